// libpn532/src/transport/mock.rs

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::constants::{PN532_ACK_FRAME, PN532_I2C_READY, PN532_PN532_TO_HOST};
use crate::protocol::Frame;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// How the mock answers readiness polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyMode {
    /// Ready whenever a response is queued.
    #[default]
    WhenQueued,
    Always,
    Never,
}

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
    ready: ReadyMode,
    resets: usize,
    /// Number of upcoming `send` calls that should fail.
    send_failures: usize,
}

/// Mock transport for unit tests. It records sent frames and returns queued
/// responses, padded or truncated to the requested read size.
///
/// Clones share state, so a test can keep a handle after moving the
/// transport into a `Device`.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push_response(&self, resp: Vec<u8>) {
        self.state().responses.push_back(resp);
    }

    /// Queue an ACK as the I2C interface delivers it (status byte first).
    pub fn push_ack(&self) {
        let mut ack = vec![PN532_I2C_READY];
        ack.extend_from_slice(&PN532_ACK_FRAME);
        self.push_response(ack);
    }

    /// Queue a status-prefixed chip->host frame carrying `data` after the TFI.
    pub fn push_reply(&self, data: &[u8]) -> Result<()> {
        let mut raw = vec![PN532_I2C_READY];
        raw.extend(Frame::encode(PN532_PN532_TO_HOST, data)?);
        self.push_response(raw);
        Ok(())
    }

    /// Queue an ACK followed by a reply: one full exchange.
    pub fn push_exchange(&self, data: &[u8]) -> Result<()> {
        self.push_ack();
        self.push_reply(data)
    }

    pub fn set_ready_mode(&mut self, mode: ReadyMode) {
        self.state().ready = mode;
    }

    /// Make the next `n` sends fail with a transport error.
    pub fn set_send_failures(&self, n: usize) {
        self.state().send_failures = n;
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    pub fn pending(&self) -> usize {
        self.state().responses.len()
    }

    pub fn resets(&self) -> usize {
        self.state().resets
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn reset(&mut self) -> Result<()> {
        // Keep queued responses so tests can pre-seed the init handshake.
        let mut state = self.state();
        state.resets += 1;
        state.sent.clear();
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state();
        if state.send_failures > 0 {
            state.send_failures -= 1;
            return Err(Error::Transport("simulated bus write failure".into()));
        }
        state.sent.push(data.to_vec());
        Ok(())
    }

    async fn receive(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut resp = self
            .state()
            .responses
            .pop_front()
            .ok_or_else(|| Error::Transport("no queued response".into()))?;
        resp.resize(count, 0x00);
        Ok(resp)
    }

    async fn poll_ready(&mut self) -> Result<bool> {
        let state = self.state();
        Ok(match state.ready {
            ReadyMode::WhenQueued => !state.responses.is_empty(),
            ReadyMode::Always => true,
            ReadyMode::Never => false,
        })
    }
}
