// fixtures.rs: commonly used test payloads and frames

use libpn532::constants::PN532_I2C_READY;
use libpn532::protocol::Frame;
use libpn532::types::{KeyType, MifareKey, Uid};

pub fn sample_uid_bytes() -> [u8; 4] {
    [0xCA, 0x3D, 0x67, 0x4F]
}

pub fn sample_uid() -> Uid {
    Uid::try_from(&sample_uid_bytes()[..]).unwrap()
}

pub fn default_key_a() -> MifareKey {
    MifareKey::new(KeyType::A, MifareKey::DEFAULT_SECRET)
}

/// Decode a spaced hex dump copied from a bus trace.
pub fn hex_bytes(dump: &str) -> Vec<u8> {
    hex::decode(dump.replace(' ', "")).expect("valid hex fixture")
}

/// 20-byte InListPassiveTarget reply for a Mifare 1K with a 4-byte UID,
/// bus status byte already stripped, tail padded.
pub fn list_target_reply() -> Vec<u8> {
    hex_bytes("00 00 FF 0C F4 D5 4B 01 01 00 04 08 04 CA 3D 67 4F 00 00 00")
}

/// The same card as the chip frames it, with a correct DCS.
pub fn list_target_frame() -> Vec<u8> {
    reply_frame(&[0x4B, 0x01, 0x01, 0x00, 0x04, 0x08, 0x04, 0xCA, 0x3D, 0x67, 0x4F])
}

/// Chip->host frame carrying `payload` after the TFI.
pub fn reply_frame(payload: &[u8]) -> Vec<u8> {
    Frame::encode(0xD5, payload).unwrap()
}

/// Frame as an I2C read returns it: status byte, frame, padding.
pub fn status_prefixed(frame: &[u8], padding: usize) -> Vec<u8> {
    let mut raw = vec![PN532_I2C_READY];
    raw.extend_from_slice(frame);
    raw.extend(std::iter::repeat(0x00).take(padding));
    raw
}

pub fn firmware_payload() -> Vec<u8> {
    vec![0x03, 0x32, 0x01, 0x06, 0x07]
}

/// A1 A2 .. AF FF: distinct bytes so offset errors show up.
pub fn pattern_block() -> [u8; 16] {
    let mut block = [0u8; 16];
    for (i, b) in block.iter_mut().take(15).enumerate() {
        *b = 0xA1 + i as u8;
    }
    block[15] = 0xFF;
    block
}
