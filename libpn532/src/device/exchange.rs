// libpn532/src/device/exchange.rs

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use log::{debug, trace};
use tokio::sync::{Mutex, MutexGuard};

use crate::constants::{PN532_ACK_LEN, PN532_READ_PADDING};
use crate::protocol::{Command, codec, is_valid_ack, is_valid_frame};
use crate::transport::Transport;
use crate::utils::timeout::to_millis;
use crate::{Error, Result};

/// Progress of one request/ack/response cycle.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ExchangeState {
    Idle,
    Sending,
    AwaitingAck,
    ReadingAck,
    AckOk,
    AckBad,
    AwaitingResponse,
    ReadingResponse,
    Done,
    Failed,
}

impl ExchangeState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Sending,
            2 => Self::AwaitingAck,
            3 => Self::ReadingAck,
            4 => Self::AckOk,
            5 => Self::AckBad,
            6 => Self::AwaitingResponse,
            7 => Self::ReadingResponse,
            8 => Self::Done,
            9 => Self::Failed,
            _ => Self::Idle,
        }
    }
}

/// Serialised access to the transport. Clones share the same transport,
/// timeout and state, so the poller, the Mifare session and the device
/// handle all queue on one lock.
#[derive(Clone)]
pub struct CommandExchange {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    timeout_ms: Arc<AtomicU64>,
    ready_poll_interval: Duration,
    state: Arc<AtomicU8>,
}

impl std::fmt::Debug for CommandExchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandExchange")
            .field("timeout", &self.timeout())
            .field("ready_poll_interval", &self.ready_poll_interval)
            .field("state", &self.state())
            .finish()
    }
}

impl CommandExchange {
    pub fn new(transport: Box<dyn Transport>, timeout: Duration, ready_poll_interval: Duration) -> Self {
        Self {
            transport: Arc::new(Mutex::new(transport)),
            timeout_ms: Arc::new(AtomicU64::new(to_millis(timeout))),
            ready_poll_interval,
            state: Arc::new(AtomicU8::new(ExchangeState::Idle as u8)),
        }
    }

    /// Run one exchange for a caller. Fails with `Busy` instead of waiting
    /// when another exchange holds the transport.
    pub async fn exchange(&self, cmd: &Command) -> Result<Vec<u8>> {
        self.try_session()?.exchange(cmd).await
    }

    /// Like `exchange`, reading `reply_len` frame bytes instead of the
    /// command's default.
    pub async fn exchange_with_len(&self, cmd: &Command, reply_len: usize) -> Result<Vec<u8>> {
        self.try_session()?.exchange_with_len(cmd, reply_len).await
    }

    /// Take the transport for a run of exchanges that must not be
    /// interleaved with anyone else's. Fails with `Busy` when another
    /// exchange holds it; queued exchanges wait until the session drops.
    pub fn try_session(&self) -> Result<ExchangeSession<'_>> {
        let transport = self.transport.try_lock().map_err(|_| Error::Busy)?;
        Ok(ExchangeSession {
            owner: self,
            transport,
        })
    }

    /// Run one exchange, waiting for any in-flight exchange first. Waiters
    /// are served in the order they arrived.
    pub async fn exchange_queued(&self, cmd: &Command) -> Result<Vec<u8>> {
        self.exchange_queued_with_len(cmd, cmd.reply_len()).await
    }

    /// Like `exchange_queued`, reading `reply_len` frame bytes instead of
    /// the command's default.
    pub async fn exchange_queued_with_len(&self, cmd: &Command, reply_len: usize) -> Result<Vec<u8>> {
        let mut transport = self.transport.lock().await;
        self.run(&mut **transport, cmd, reply_len).await
    }

    /// Pulse the chip reset once any in-flight exchange has finished.
    pub async fn reset(&self) -> Result<()> {
        let mut transport = self.transport.lock().await;
        debug!("resetting PN532");
        transport.reset().await
    }

    pub fn set_timeout(&self, timeout: Duration) -> Result<()> {
        if timeout.is_zero() {
            return Err(Error::invalid_argument("exchange timeout must be non-zero"));
        }
        self.timeout_ms.store(to_millis(timeout), Ordering::Relaxed);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.load(Ordering::Relaxed))
    }

    /// State reached by the most recent exchange.
    pub fn state(&self) -> ExchangeState {
        ExchangeState::from_u8(self.state.load(Ordering::Relaxed))
    }

    /// True while an exchange holds the transport.
    pub fn is_busy(&self) -> bool {
        self.transport.try_lock().is_err()
    }

    fn enter(&self, opcode: u8, next: ExchangeState) {
        let prev = ExchangeState::from_u8(self.state.swap(next as u8, Ordering::Relaxed));
        trace!("exchange {:#04x}: {} -> {}", opcode, prev, next);
    }

    async fn run(&self, transport: &mut dyn Transport, cmd: &Command, reply_len: usize) -> Result<Vec<u8>> {
        let opcode = cmd.opcode();
        self.enter(opcode, ExchangeState::Idle);
        match self.cycle(transport, cmd, reply_len).await {
            Ok(frame) => {
                self.enter(opcode, ExchangeState::Done);
                Ok(frame)
            }
            Err(e) => {
                self.enter(opcode, ExchangeState::Failed);
                debug!("exchange {:#04x} failed: {}", opcode, e);
                Err(e)
            }
        }
    }

    async fn cycle(&self, transport: &mut dyn Transport, cmd: &Command, reply_len: usize) -> Result<Vec<u8>> {
        let opcode = cmd.opcode();
        let frame = codec::encode_command_frame(cmd);
        self.enter(opcode, ExchangeState::Sending);
        #[cfg(feature = "diagnostics")]
        trace!(">> {}", crate::utils::bytes_to_hex_spaced(&frame));
        transport.send(&frame).await?;

        self.enter(opcode, ExchangeState::AwaitingAck);
        self.wait_ready(transport).await?;
        self.enter(opcode, ExchangeState::ReadingAck);
        let ack = transport.receive(PN532_ACK_LEN + PN532_READ_PADDING).await?;
        #[cfg(feature = "diagnostics")]
        trace!("<< {}", crate::utils::bytes_to_hex_spaced(&ack));
        if !is_valid_ack(&ack) {
            self.enter(opcode, ExchangeState::AckBad);
            return Err(Error::AckInvalid);
        }
        self.enter(opcode, ExchangeState::AckOk);

        self.enter(opcode, ExchangeState::AwaitingResponse);
        self.wait_ready(transport).await?;
        self.enter(opcode, ExchangeState::ReadingResponse);
        let raw = transport.receive(reply_len + PN532_READ_PADDING).await?;
        #[cfg(feature = "diagnostics")]
        trace!("<< {}", crate::utils::bytes_to_hex_spaced(&raw));
        if !is_valid_frame(&raw) {
            return Err(Error::malformed(format!(
                "reply to {:#04x} failed frame validation",
                opcode
            )));
        }
        Ok(codec::strip_status(&raw).to_vec())
    }

    async fn wait_ready(&self, transport: &mut dyn Transport) -> Result<()> {
        let timeout = self.timeout();
        match tokio::time::timeout(timeout, transport.await_ready(timeout, self.ready_poll_interval)).await {
            Ok(res) => res,
            Err(_) => Err(Error::Timeout),
        }
    }
}

/// Exclusive hold on the transport, taken with
/// [`CommandExchange::try_session`].
pub struct ExchangeSession<'a> {
    owner: &'a CommandExchange,
    transport: MutexGuard<'a, Box<dyn Transport>>,
}

impl std::fmt::Debug for ExchangeSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeSession")
            .field("state", &self.owner.state())
            .finish_non_exhaustive()
    }
}

impl ExchangeSession<'_> {
    pub async fn exchange(&mut self, cmd: &Command) -> Result<Vec<u8>> {
        self.exchange_with_len(cmd, cmd.reply_len()).await
    }

    pub async fn exchange_with_len(&mut self, cmd: &Command, reply_len: usize) -> Result<Vec<u8>> {
        self.owner.run(&mut **self.transport, cmd, reply_len).await
    }
}
