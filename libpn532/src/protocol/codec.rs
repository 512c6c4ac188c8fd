// libpn532/src/protocol/codec.rs

use crate::Result;

use super::commands::Command;
use super::frame::{Frame, frame_start, validate};
use super::parser;

/// Encode a Command into a full wire frame (with preamble/LCS/DCS/postamble).
pub fn encode_command_frame(cmd: &Command) -> Vec<u8> {
    cmd.encode()
}

/// Drop the bus status byte (if any) so the returned slice starts at the
/// preamble. Invalid frames are returned unchanged.
pub fn strip_status(raw: &[u8]) -> &[u8] {
    match validate(raw) {
        Ok(span) => &raw[span.start..],
        Err(_) => raw,
    }
}

/// Decode a reply frame for `cmd` and return the data following the
/// response code.
pub fn decode_response_frame(cmd: &Command, frame: &[u8]) -> Result<Vec<u8>> {
    let mut payload = Frame::decode(frame)?;
    parser::expect_response_code(&payload, cmd.response_code())?;
    payload.remove(0);
    Ok(payload)
}

/// True when `raw` starts with the bus status byte ahead of a frame.
pub fn has_status_byte(raw: &[u8]) -> bool {
    frame_start(raw) == Some(1)
}
