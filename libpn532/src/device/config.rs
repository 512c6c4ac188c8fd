// libpn532/src/device/config.rs

use std::time::Duration;

use crate::constants::LIST_PASSIVE_TARGET_REPLY_LEN;
use crate::types::BaudRate;
use crate::utils::timeout::{
    DEFAULT_POLL_PERIOD_MS, DEFAULT_READY_POLL_INTERVAL_MS, DEFAULT_WAKE_UP_DELAY_MS,
    default_exchange_timeout, ms,
};
use crate::{Error, Result};

/// Driver tunables. Durations are serialised as `{ secs, nanos }` with the
/// `serde` feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Delay between card poll cycles.
    pub poll_period: Duration,
    /// Bound on each readiness wait inside an exchange.
    pub exchange_timeout: Duration,
    /// Sampling interval for level-triggered readiness.
    pub ready_poll_interval: Duration,
    /// Pause after the reset pulse before the first command.
    pub wake_up_delay: Duration,
    /// Reply frame bytes read per poll cycle (bus padding comes on top).
    /// 20 covers 4- and 7-byte UIDs; 10-byte UIDs need at least 23.
    pub list_target_reply_len: usize,
    /// Modulation used by the card poller.
    pub poll_baud: BaudRate,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            poll_period: ms(DEFAULT_POLL_PERIOD_MS),
            exchange_timeout: default_exchange_timeout(),
            ready_poll_interval: ms(DEFAULT_READY_POLL_INTERVAL_MS),
            wake_up_delay: ms(DEFAULT_WAKE_UP_DELAY_MS),
            list_target_reply_len: LIST_PASSIVE_TARGET_REPLY_LEN,
            poll_baud: BaudRate::Iso14443A,
        }
    }
}

impl DeviceConfig {
    /// Reject settings the driver cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_period.is_zero() {
            return Err(Error::invalid_argument("poll period must be non-zero"));
        }
        if self.exchange_timeout.is_zero() {
            return Err(Error::invalid_argument("exchange timeout must be non-zero"));
        }
        if self.ready_poll_interval.is_zero() {
            return Err(Error::invalid_argument(
                "ready poll interval must be non-zero",
            ));
        }
        // Smallest reply: a frame carrying TFI + response code.
        if self.list_target_reply_len < 9 {
            return Err(Error::invalid_argument(format!(
                "list target reply length {} too short",
                self.list_target_reply_len
            )));
        }
        Ok(())
    }
}
