//! Timing defaults used across the crate.
//!
//! All values are in milliseconds; `ms()` turns them into `Duration`s.

use std::time::Duration;

/// Delay between card poll cycles.
pub const DEFAULT_POLL_PERIOD_MS: u64 = 250;

/// Bound on each readiness wait inside a command exchange.
pub const DEFAULT_EXCHANGE_TIMEOUT_MS: u64 = 500;

/// Sampling interval for transports that only expose a readiness level.
pub const DEFAULT_READY_POLL_INTERVAL_MS: u64 = 10;

/// Fixed pause after the reset pulse before the chip accepts commands.
pub const DEFAULT_WAKE_UP_DELAY_MS: u64 = 100;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convenience: default exchange timeout as Duration.
pub fn default_exchange_timeout() -> Duration {
    ms(DEFAULT_EXCHANGE_TIMEOUT_MS)
}

/// Milliseconds in `d`, saturating, with sub-millisecond values rounded up
/// so a non-zero duration never becomes zero.
pub fn to_millis(d: Duration) -> u64 {
    let whole = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
    if whole == 0 && !d.is_zero() { 1 } else { whole }
}
