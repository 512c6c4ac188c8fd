// libpn532/src/constants.rs
//! Common protocol constants used across the crate

/// Normal information frame preamble + start code: 0x00 0x00 0xFF
pub const PN532_PREAMBLE: [u8; 3] = [0x00, 0x00, 0xFF];

/// Frame postamble
pub const PN532_POSTAMBLE: u8 = 0x00;

/// ACK frame as it appears on the wire (postamble included)
pub const PN532_ACK_FRAME: [u8; 6] = [0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00];

/// Length of the ACK frame read from the chip
pub const PN532_ACK_LEN: usize = 6;

/// Extra bytes read on top of every ack/response read. The bus delivers a
/// leading status byte and may pad the tail.
pub const PN532_READ_PADDING: usize = 2;

/// Status byte prepended by the I2C interface when the chip is ready
pub const PN532_I2C_READY: u8 = 0x01;

/// Frame bytes other than TFI + payload: preamble(3) len lcs dcs postamble
pub const PN532_FRAME_OVERHEAD: usize = 7;

/// Largest `len` a normal information frame can carry (TFI + payload)
pub const PN532_MAX_FRAME_LEN: usize = 255;

/// PN532 host->chip TFI (D4) and chip->host TFI (D5)
pub const PN532_HOST_TO_PN532: u8 = 0xD4;
pub const PN532_PN532_TO_HOST: u8 = 0xD5;

/// PN532 command codes
pub const PN532_CMD_GET_FIRMWARE_VERSION: u8 = 0x02;
pub const PN532_CMD_SAM_CONFIGURATION: u8 = 0x14;
pub const PN532_CMD_IN_DATA_EXCHANGE: u8 = 0x40;
pub const PN532_CMD_IN_LIST_PASSIVE_TARGET: u8 = 0x4A;

/// Mifare Classic card commands, carried inside InDataExchange
pub const MIFARE_CMD_AUTH_A: u8 = 0x60;
pub const MIFARE_CMD_AUTH_B: u8 = 0x61;
pub const MIFARE_CMD_READ: u8 = 0x30;
pub const MIFARE_CMD_WRITE: u8 = 0xA0;

/// Mifare Classic block size in bytes
pub const MIFARE_BLOCK_LEN: usize = 16;

/// Mifare Classic key length in bytes
pub const MIFARE_KEY_LEN: usize = 6;

/// InDataExchange status returned for a failed Mifare authentication
pub const PN532_STATUS_AUTH_ERROR: u8 = 0x14;

/// Reply lengths (frame bytes, excluding bus padding) read per command
pub const FIRMWARE_VERSION_REPLY_LEN: usize = 12;
pub const SAM_CONFIGURATION_REPLY_LEN: usize = 8;
pub const LIST_PASSIVE_TARGET_REPLY_LEN: usize = 20;
pub const DATA_EXCHANGE_REPLY_LEN: usize = 26;
