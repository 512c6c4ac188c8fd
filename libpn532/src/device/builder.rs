// libpn532/src/device/builder.rs

use std::time::Duration;

use crate::device::config::DeviceConfig;
use crate::device::handle::{Device, Initialized, Uninitialized};
use crate::transport::Transport;
use crate::types::BaudRate;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport>>,
    config: DeviceConfig,
}

impl DeviceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the bus transport (or a test double).
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn poll_period(mut self, period: Duration) -> Self {
        self.config.poll_period = period;
        self
    }

    pub fn exchange_timeout(mut self, timeout: Duration) -> Self {
        self.config.exchange_timeout = timeout;
        self
    }

    pub fn ready_poll_interval(mut self, interval: Duration) -> Self {
        self.config.ready_poll_interval = interval;
        self
    }

    pub fn wake_up_delay(mut self, delay: Duration) -> Self {
        self.config.wake_up_delay = delay;
        self
    }

    pub fn list_target_reply_len(mut self, len: usize) -> Self {
        self.config.list_target_reply_len = len;
        self
    }

    pub fn poll_baud(mut self, baud: BaudRate) -> Self {
        self.config.poll_baud = baud;
        self
    }

    /// Consume the builder and return an uninitialized Device.
    /// Fails with `InvalidArgument` without a transport or with an
    /// unusable configuration.
    pub fn build_uninitialized(self) -> Result<Device<Uninitialized>> {
        match self.transport {
            Some(t) => Device::new_with_transport(t, self.config),
            None => Err(Error::invalid_argument("no transport provided")),
        }
    }

    /// Build and run the start-up sequence.
    pub async fn initialize(self) -> Result<Device<Initialized>> {
        self.build_uninitialized()?.initialize().await
    }
}
