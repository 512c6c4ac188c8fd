// libpn532/src/protocol/commands/mifare.rs

use crate::constants::{MIFARE_BLOCK_LEN, MIFARE_CMD_READ, MIFARE_CMD_WRITE};
use crate::types::{BlockAddress, BlockData, MifareKey, Uid};

/// Logical target number used for the single listed card.
pub const DEFAULT_TARGET: u8 = 0x01;

/// Encode InDataExchange parameters: target number followed by the raw
/// card command.
pub fn encode_in_data_exchange(target: u8, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(target);
    buf.extend_from_slice(data);
    buf
}

/// Mifare Classic authenticate: cmd(60/61) block key(6) uid(4 or 7)
pub fn encode_mifare_auth(block: BlockAddress, key: &MifareKey, uid: &Uid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + key.secret().len() + uid.len());
    buf.push(key.key_type().auth_command());
    buf.push(block.as_u8());
    buf.extend_from_slice(key.secret());
    buf.extend_from_slice(uid.as_bytes());
    buf
}

/// Mifare Classic read: 30 block
pub fn encode_mifare_read(block: BlockAddress) -> Vec<u8> {
    vec![MIFARE_CMD_READ, block.as_u8()]
}

/// Mifare Classic write: A0 block data(16)
pub fn encode_mifare_write(block: BlockAddress, data: &BlockData) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2 + MIFARE_BLOCK_LEN);
    buf.push(MIFARE_CMD_WRITE);
    buf.push(block.as_u8());
    buf.extend_from_slice(data.as_bytes());
    buf
}
