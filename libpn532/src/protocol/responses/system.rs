// libpn532/src/protocol/responses/system.rs

use crate::constants::{PN532_CMD_GET_FIRMWARE_VERSION, PN532_CMD_SAM_CONFIGURATION};
use crate::protocol::frame::Frame;
use crate::protocol::parser;
use crate::types::FirmwareVersion;
use crate::Result;

/// Decode a GetFirmwareVersion reply frame.
/// Payload layout: response_code(0x03) IC Ver Rev Support
pub fn decode_firmware_version(frame: &[u8]) -> Result<FirmwareVersion> {
    let payload = Frame::decode(frame)?;
    parser::expect_response_code(&payload, PN532_CMD_GET_FIRMWARE_VERSION + 1)?;
    let fields = parser::slice_at(&payload, 1, 4)?;
    Ok(FirmwareVersion {
        ic: fields[0],
        version: fields[1],
        revision: fields[2],
        support: fields[3],
    })
}

/// Check a SAMConfiguration reply frame (bare response code 0x15).
pub fn decode_sam_configuration(frame: &[u8]) -> Result<()> {
    let payload = Frame::decode(frame)?;
    parser::expect_response_code(&payload, PN532_CMD_SAM_CONFIGURATION + 1)
}
