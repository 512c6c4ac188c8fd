// libpn532/src/protocol/responses/exchange.rs

use crate::constants::PN532_CMD_IN_DATA_EXCHANGE;
use crate::protocol::frame::Frame;
use crate::protocol::parser;
use crate::Result;

/// Decoded InDataExchange reply: chip status byte plus card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataExchangeReply {
    pub status: u8,
    pub data: Vec<u8>,
}

impl DataExchangeReply {
    /// Validate an InDataExchange reply frame and split out the status byte.
    /// Layout after the TFI: 0x41 status data..
    pub fn parse(frame: &[u8]) -> Result<Self> {
        let payload = Frame::decode(frame)?;
        parser::expect_response_code(&payload, PN532_CMD_IN_DATA_EXCHANGE + 1)?;
        let status = parser::byte_at(&payload, 1)?;
        Ok(Self {
            status,
            data: payload[2..].to_vec(),
        })
    }

    pub fn is_success(&self) -> bool {
        self.status == 0x00
    }

    /// Error code bits (the low six bits of the status byte).
    pub fn error_code(&self) -> u8 {
        self.status & 0x3F
    }
}
