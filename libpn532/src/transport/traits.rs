// libpn532/src/transport/traits.rs

use std::time::Duration;

use async_trait::async_trait;

use crate::{Error, Result};

/// Transport trait abstracts the bus (I2C, SPI, HSU) away from the
/// protocol/device logic. Implementations need not be thread-safe; the
/// driver never issues two operations concurrently on one transport.
///
/// Readiness can be exposed either level-triggered (`poll_ready`) or
/// edge-triggered (`await_ready`); an implementation must provide at least
/// one of the two.
#[async_trait]
pub trait Transport: Send {
    /// Pulse the chip reset line.
    async fn reset(&mut self) -> Result<()>;

    /// Write raw bytes to the chip.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Read exactly `count` bytes from the chip.
    async fn receive(&mut self, count: usize) -> Result<Vec<u8>>;

    /// Sample the readiness line once. The default reports that the
    /// transport cannot poll.
    async fn poll_ready(&mut self) -> Result<bool> {
        Err(Error::Transport(
            "transport supports neither readiness polling nor notification".into(),
        ))
    }

    /// Suspend until the chip signals readiness or `timeout` elapses.
    ///
    /// The default polls `poll_ready` every `poll_interval`, sleeping in
    /// between. Edge-triggered transports override this.
    async fn await_ready(&mut self, timeout: Duration, poll_interval: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.poll_ready().await? {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::Timeout);
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}
