// libpn532/src/transport/emulator.rs
//! Behavioural PN532 stand-in for tests and benches.
//!
//! The emulator parses each host frame, queues an ACK plus a reply, and
//! raises readiness while anything is queued. It answers the initialisation
//! commands, lists a single ISO14443A card and serves Mifare Classic
//! authenticate/read/write against an in-memory card.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::card::{sector_of, sector_trailer};
use crate::constants::{
    MIFARE_BLOCK_LEN, MIFARE_CMD_AUTH_A, MIFARE_CMD_AUTH_B, MIFARE_CMD_READ, MIFARE_CMD_WRITE,
    MIFARE_KEY_LEN, PN532_ACK_FRAME, PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_IN_DATA_EXCHANGE,
    PN532_CMD_IN_LIST_PASSIVE_TARGET, PN532_CMD_SAM_CONFIGURATION, PN532_HOST_TO_PN532,
    PN532_I2C_READY, PN532_PN532_TO_HOST, PN532_STATUS_AUTH_ERROR,
};
use crate::protocol::frame::validate;
use crate::protocol::Frame;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Status the chip reports when the card does not answer.
pub const STATUS_CARD_TIMEOUT: u8 = 0x01;
/// Status for a command the chip cannot carry out in its current state.
pub const STATUS_NOT_ACCEPTABLE: u8 = 0x27;

/// A single fault applied to the next command the emulator receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// Swallow the command: no ACK, readiness never rises.
    Silent,
    /// ACK the command, then never deliver the reply.
    NoReply,
    /// Answer with a NACK instead of an ACK.
    BadAck,
    /// Deliver the reply with a broken data checksum.
    CorruptReply,
    /// Override the InDataExchange status byte.
    Status(u8),
}

/// Mifare Classic card held by the emulator.
#[derive(Debug, Clone)]
pub struct EmulatedCard {
    pub uid: Vec<u8>,
    pub sens_res: [u8; 2],
    pub sel_res: u8,
    blocks: HashMap<u8, [u8; MIFARE_BLOCK_LEN]>,
    /// Per-sector (key A, key B).
    keys: HashMap<u8, ([u8; MIFARE_KEY_LEN], [u8; MIFARE_KEY_LEN])>,
}

impl EmulatedCard {
    /// Factory-fresh Mifare Classic 1K: zeroed data, transport keys FF..FF.
    pub fn classic_1k(uid: &[u8]) -> Self {
        Self {
            uid: uid.to_vec(),
            sens_res: [0x00, 0x04],
            sel_res: 0x08,
            blocks: HashMap::new(),
            keys: HashMap::new(),
        }
    }

    pub fn with_keys(
        mut self,
        sector: u8,
        key_a: [u8; MIFARE_KEY_LEN],
        key_b: [u8; MIFARE_KEY_LEN],
    ) -> Self {
        self.keys.insert(sector, (key_a, key_b));
        self
    }

    pub fn block(&self, block: u8) -> [u8; MIFARE_BLOCK_LEN] {
        self.blocks
            .get(&block)
            .copied()
            .unwrap_or([0u8; MIFARE_BLOCK_LEN])
    }

    fn keys_for(&self, sector: u8) -> ([u8; MIFARE_KEY_LEN], [u8; MIFARE_KEY_LEN]) {
        self.keys
            .get(&sector)
            .copied()
            .unwrap_or(([0xFF; MIFARE_KEY_LEN], [0xFF; MIFARE_KEY_LEN]))
    }
}

#[derive(Debug)]
struct ChipState {
    firmware: [u8; 4],
    status_byte: bool,
    card: Option<EmulatedCard>,
    selected: bool,
    authenticated: Option<u8>,
    pending: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
    faults: VecDeque<Fault>,
    resets: usize,
    list_requests: usize,
}

impl Default for ChipState {
    fn default() -> Self {
        Self {
            // PN532, firmware 1.6, ISO14443A/B + ISO18092
            firmware: [0x32, 0x01, 0x06, 0x07],
            status_byte: true,
            card: None,
            selected: false,
            authenticated: None,
            pending: VecDeque::new(),
            sent: Vec::new(),
            faults: VecDeque::new(),
            resets: 0,
            list_requests: 0,
        }
    }
}

/// Emulated PN532 behind the [`Transport`] contract. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ChipEmulator {
    inner: Arc<Mutex<ChipState>>,
}

impl ChipEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emulator with a card already in the field.
    pub fn with_card(card: EmulatedCard) -> Self {
        let emu = Self::new();
        emu.insert_card(card);
        emu
    }

    fn state(&self) -> MutexGuard<'_, ChipState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn insert_card(&self, card: EmulatedCard) {
        let mut state = self.state();
        state.card = Some(card);
        state.selected = false;
        state.authenticated = None;
    }

    pub fn remove_card(&self) -> Option<EmulatedCard> {
        let mut state = self.state();
        state.selected = false;
        state.authenticated = None;
        state.card.take()
    }

    /// Snapshot of the card currently in the field.
    pub fn card(&self) -> Option<EmulatedCard> {
        self.state().card.clone()
    }

    /// Toggle the leading bus status byte on reads (on by default, as on
    /// I2C).
    pub fn set_status_byte(&self, enabled: bool) {
        self.state().status_byte = enabled;
    }

    /// Queue a fault for the next command.
    pub fn inject(&self, fault: Fault) {
        self.state().faults.push_back(fault);
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    pub fn resets(&self) -> usize {
        self.state().resets
    }

    /// Number of InListPassiveTarget commands seen so far.
    pub fn list_requests(&self) -> usize {
        self.state().list_requests
    }
}

impl ChipState {
    fn handle_frame(&mut self, frame: &[u8]) {
        let fault = self.faults.pop_front();
        if fault == Some(Fault::Silent) {
            return;
        }
        let body = match validate(frame) {
            Ok(span) if frame[span.data_start] == PN532_HOST_TO_PN532 && span.len >= 2 => {
                frame[span.data_start + 1..span.data_start + span.len].to_vec()
            }
            _ => {
                // Application-level error frame.
                self.pending.push_back(vec![0x00, 0x00, 0xFF, 0x01, 0xFF, 0x7F, 0x81, 0x00]);
                return;
            }
        };

        if fault == Some(Fault::BadAck) {
            self.pending
                .push_back(vec![0x00, 0x00, 0xFF, 0xFF, 0x00, 0x00]);
            return;
        }
        self.pending.push_back(PN532_ACK_FRAME.to_vec());
        if fault == Some(Fault::NoReply) {
            return;
        }

        let opcode = body[0];
        let params = &body[1..];
        let forced = match fault {
            Some(Fault::Status(s)) => Some(s),
            _ => None,
        };
        let Some(payload) = self.respond(opcode, params, forced) else {
            return;
        };

        let Ok(mut reply) = Frame::encode(PN532_PN532_TO_HOST, &payload) else {
            return;
        };
        if fault == Some(Fault::CorruptReply) {
            let dcs_idx = reply.len() - 2;
            reply[dcs_idx] = reply[dcs_idx].wrapping_add(1);
        }
        self.pending.push_back(reply);
    }

    /// Reply payload (response code onwards), or `None` when the chip keeps
    /// waiting.
    fn respond(&mut self, opcode: u8, params: &[u8], forced: Option<u8>) -> Option<Vec<u8>> {
        let code = opcode.wrapping_add(1);
        match opcode {
            PN532_CMD_GET_FIRMWARE_VERSION => {
                let mut out = vec![code];
                out.extend_from_slice(&self.firmware);
                Some(out)
            }
            PN532_CMD_SAM_CONFIGURATION => Some(vec![code]),
            PN532_CMD_IN_LIST_PASSIVE_TARGET => {
                self.list_requests += 1;
                self.authenticated = None;
                // Without a card the chip keeps searching and never answers.
                let card = self.card.as_ref()?;
                self.selected = true;
                let mut out = vec![code, 0x01, 0x01];
                out.extend_from_slice(&card.sens_res);
                out.push(card.sel_res);
                out.push(card.uid.len() as u8);
                out.extend_from_slice(&card.uid);
                Some(out)
            }
            PN532_CMD_IN_DATA_EXCHANGE => {
                let (status, data) = match forced {
                    Some(s) => (s, Vec::new()),
                    None => self.mifare(params),
                };
                let mut out = vec![code, status];
                out.extend(data);
                Some(out)
            }
            _ => Some(vec![code]),
        }
    }

    fn mifare(&mut self, params: &[u8]) -> (u8, Vec<u8>) {
        // params: target cmd block ..
        if params.len() < 3 {
            return (STATUS_NOT_ACCEPTABLE, Vec::new());
        }
        let (cmd, block, rest) = (params[1], params[2], &params[3..]);
        let authenticated = self.authenticated;
        let selected = self.selected;
        let Some(card) = self.card.as_mut().filter(|_| selected) else {
            return (STATUS_CARD_TIMEOUT, Vec::new());
        };
        let sector = sector_of(block);

        match cmd {
            MIFARE_CMD_AUTH_A | MIFARE_CMD_AUTH_B => {
                let (key_a, key_b) = card.keys_for(sector);
                let expected = if cmd == MIFARE_CMD_AUTH_A { key_a } else { key_b };
                let ok = rest.len() == MIFARE_KEY_LEN + card.uid.len()
                    && rest[..MIFARE_KEY_LEN] == expected
                    && rest[MIFARE_KEY_LEN..] == card.uid[..];
                if ok {
                    self.authenticated = Some(sector);
                    (0x00, Vec::new())
                } else {
                    self.authenticated = None;
                    (PN532_STATUS_AUTH_ERROR, Vec::new())
                }
            }
            MIFARE_CMD_READ if authenticated == Some(sector) => {
                (0x00, card.block(block).to_vec())
            }
            MIFARE_CMD_WRITE if authenticated == Some(sector) => {
                if rest.len() != MIFARE_BLOCK_LEN {
                    return (STATUS_NOT_ACCEPTABLE, Vec::new());
                }
                let mut data = [0u8; MIFARE_BLOCK_LEN];
                data.copy_from_slice(rest);
                card.blocks.insert(block, data);
                if block == sector_trailer(block) {
                    let mut key_a = [0u8; MIFARE_KEY_LEN];
                    let mut key_b = [0u8; MIFARE_KEY_LEN];
                    key_a.copy_from_slice(&data[..6]);
                    key_b.copy_from_slice(&data[10..]);
                    card.keys.insert(sector, (key_a, key_b));
                }
                (0x00, Vec::new())
            }
            MIFARE_CMD_READ | MIFARE_CMD_WRITE => (PN532_STATUS_AUTH_ERROR, Vec::new()),
            _ => (STATUS_NOT_ACCEPTABLE, Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for ChipEmulator {
    async fn reset(&mut self) -> Result<()> {
        let mut state = self.state();
        state.resets += 1;
        state.pending.clear();
        state.selected = false;
        state.authenticated = None;
        Ok(())
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state();
        state.sent.push(data.to_vec());
        state.handle_frame(data);
        Ok(())
    }

    async fn receive(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut state = self.state();
        let frame = state
            .pending
            .pop_front()
            .ok_or_else(|| Error::Transport("read while chip not ready".into()))?;
        let mut out = Vec::with_capacity(count);
        if state.status_byte {
            out.push(PN532_I2C_READY);
        }
        out.extend(frame);
        out.resize(count, 0x00);
        Ok(out)
    }

    async fn poll_ready(&mut self) -> Result<bool> {
        Ok(!self.state().pending.is_empty())
    }
}
