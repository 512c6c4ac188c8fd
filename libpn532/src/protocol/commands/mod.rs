// libpn532/src/protocol/commands/mod.rs

pub mod mifare;
pub mod system;
pub mod target;

pub use mifare::{
    encode_in_data_exchange, encode_mifare_auth, encode_mifare_read, encode_mifare_write,
};
pub use system::{encode_get_firmware_version, encode_sam_configuration};
pub use target::encode_in_list_passive_target;

use crate::constants::{
    DATA_EXCHANGE_REPLY_LEN, FIRMWARE_VERSION_REPLY_LEN, LIST_PASSIVE_TARGET_REPLY_LEN,
    PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_IN_DATA_EXCHANGE, PN532_CMD_IN_LIST_PASSIVE_TARGET,
    PN532_CMD_SAM_CONFIGURATION, SAM_CONFIGURATION_REPLY_LEN,
};
use crate::protocol::frame::{MAX_COMMAND_PARAMS, encode_command};
use crate::types::BaudRate;
use crate::{Error, Result};

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetFirmwareVersion,
    SamConfiguration {
        mode: u8,
        timeout: u8,
        use_irq: bool,
    },
    InListPassiveTarget {
        max_targets: u8,
        baud: BaudRate,
    },
    InDataExchange {
        target: u8,
        data: Vec<u8>,
    },
    /// Any other chip command, sent through the same exchange.
    Raw {
        opcode: u8,
        params: Vec<u8>,
        reply_len: usize,
    },
}

impl Command {
    /// SAM configuration used at start-up: normal mode, 1 s timeout, IRQ on.
    pub fn sam_normal() -> Self {
        Self::SamConfiguration {
            mode: system::SAM_MODE_NORMAL,
            timeout: system::SAM_DEFAULT_TIMEOUT,
            use_irq: true,
        }
    }

    /// Single-target InListPassiveTarget at the given baud rate.
    pub fn list_passive_target(baud: BaudRate) -> Self {
        Self::InListPassiveTarget {
            max_targets: 1,
            baud,
        }
    }

    /// InDataExchange towards `target`. Rejects card commands that would not
    /// fit in one frame.
    pub fn in_data_exchange(target: u8, data: Vec<u8>) -> Result<Self> {
        if data.len() + 1 > MAX_COMMAND_PARAMS {
            return Err(Error::invalid_argument(format!(
                "data exchange payload too long: {} bytes",
                data.len()
            )));
        }
        Ok(Self::InDataExchange { target, data })
    }

    /// Arbitrary command with an explicit reply length.
    pub fn raw(opcode: u8, params: Vec<u8>, reply_len: usize) -> Result<Self> {
        if params.len() > MAX_COMMAND_PARAMS {
            return Err(Error::invalid_argument(format!(
                "too many command parameters: {} (max {})",
                params.len(),
                MAX_COMMAND_PARAMS
            )));
        }
        Ok(Self::Raw {
            opcode,
            params,
            reply_len,
        })
    }

    /// PN532 command code.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::GetFirmwareVersion => PN532_CMD_GET_FIRMWARE_VERSION,
            Self::SamConfiguration { .. } => PN532_CMD_SAM_CONFIGURATION,
            Self::InListPassiveTarget { .. } => PN532_CMD_IN_LIST_PASSIVE_TARGET,
            Self::InDataExchange { .. } => PN532_CMD_IN_DATA_EXCHANGE,
            Self::Raw { opcode, .. } => *opcode,
        }
    }

    /// Response code the chip answers with (command code + 1).
    pub fn response_code(&self) -> u8 {
        self.opcode().wrapping_add(1)
    }

    /// Encode the parameter bytes that follow the opcode.
    pub fn params(&self) -> Vec<u8> {
        match self {
            Self::GetFirmwareVersion => encode_get_firmware_version(),
            Self::SamConfiguration {
                mode,
                timeout,
                use_irq,
            } => encode_sam_configuration(*mode, *timeout, *use_irq),
            Self::InListPassiveTarget { max_targets, baud } => {
                encode_in_list_passive_target(*max_targets, *baud)
            }
            Self::InDataExchange { target, data } => encode_in_data_exchange(*target, data),
            Self::Raw { params, .. } => params.clone(),
        }
    }

    /// Encode the full host->chip wire frame.
    pub fn encode(&self) -> Vec<u8> {
        encode_command(self.opcode(), &self.params())
    }

    /// Number of reply bytes to read for this command (before bus padding).
    pub fn reply_len(&self) -> usize {
        match self {
            Self::GetFirmwareVersion => FIRMWARE_VERSION_REPLY_LEN,
            Self::SamConfiguration { .. } => SAM_CONFIGURATION_REPLY_LEN,
            Self::InListPassiveTarget { .. } => LIST_PASSIVE_TARGET_REPLY_LEN,
            Self::InDataExchange { .. } => DATA_EXCHANGE_REPLY_LEN,
            Self::Raw { reply_len, .. } => *reply_len,
        }
    }
}
