// libpn532/src/protocol/frame.rs

use crate::constants::{
    PN532_ACK_FRAME, PN532_FRAME_OVERHEAD, PN532_HOST_TO_PN532, PN532_I2C_READY,
    PN532_MAX_FRAME_LEN, PN532_PN532_TO_HOST, PN532_POSTAMBLE, PN532_PREAMBLE,
};
use crate::protocol::checksum::{dcs, lcs, sum};
use crate::{Error, Result};

/// Most parameter bytes a command frame can carry (LEN also covers TFI and
/// the opcode).
pub const MAX_COMMAND_PARAMS: usize = PN532_MAX_FRAME_LEN - 2;

/// PN532 normal information frame helper.
/// Format: [Preamble+Start(3)] [Len(1)] [LCS(1)] [TFI(1)] [Data(n)] [DCS(1)] [Postamble(1)]
/// Len counts TFI + Data. DCS closes the sum of TFI + Data to zero.
pub struct Frame;

impl Frame {
    /// Encode `tfi` + `data` into a full wire frame.
    pub fn encode(tfi: u8, data: &[u8]) -> Result<Vec<u8>> {
        if data.len() + 1 > PN532_MAX_FRAME_LEN {
            return Err(Error::invalid_argument(format!(
                "frame data too long: {} bytes (max {})",
                data.len(),
                PN532_MAX_FRAME_LEN - 1
            )));
        }
        Ok(write_frame(tfi, &[data]))
    }

    /// Validate a chip->host frame (optionally preceded by the bus status
    /// byte) and return the bytes following the TFI: response code + data.
    pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
        let span = validate(bytes)?;
        let body = &bytes[span.data_start..span.data_start + span.len];
        if body[0] != PN532_PN532_TO_HOST {
            return Err(Error::malformed(format!(
                "unexpected TFI {:#04x}, expected {:#04x}",
                body[0], PN532_PN532_TO_HOST
            )));
        }
        Ok(body[1..].to_vec())
    }
}

/// Encode a host->chip command frame:
/// `00 00 FF LEN LCS D4 opcode params.. DCS 00`.
///
/// Total for any `params` up to [`MAX_COMMAND_PARAMS`]; the typed
/// `Command` constructors keep parameter lists inside that bound.
pub fn encode_command(opcode: u8, params: &[u8]) -> Vec<u8> {
    debug_assert!(params.len() <= MAX_COMMAND_PARAMS);
    write_frame(PN532_HOST_TO_PN532, &[&[opcode], params])
}

fn write_frame(tfi: u8, parts: &[&[u8]]) -> Vec<u8> {
    let data_len: usize = parts.iter().map(|p| p.len()).sum();
    let len = (1 + data_len) as u8;
    let mut out = Vec::with_capacity(PN532_FRAME_OVERHEAD + 1 + data_len);
    out.extend_from_slice(&PN532_PREAMBLE);
    out.push(len);
    out.push(lcs(len));
    out.push(tfi);
    for part in parts {
        out.extend_from_slice(part);
    }
    let checksum = dcs(&out[5..]);
    out.push(checksum);
    out.push(PN532_POSTAMBLE);
    out
}

/// Offset of the preamble inside a received buffer: 0 for a bare frame,
/// 1 when the bus status byte leads.
pub fn frame_start(bytes: &[u8]) -> Option<usize> {
    if bytes.starts_with(&PN532_PREAMBLE) {
        Some(0)
    } else if bytes.first() == Some(&PN532_I2C_READY) && bytes[1..].starts_with(&PN532_PREAMBLE) {
        Some(1)
    } else {
        None
    }
}

/// True iff `bytes` carries the ACK frame at offset 0, or at offset 1 behind
/// the bus status byte. Trailing padding is ignored.
pub fn is_valid_ack(bytes: &[u8]) -> bool {
    if bytes.starts_with(&PN532_ACK_FRAME) {
        return true;
    }
    bytes.first() == Some(&PN532_I2C_READY) && bytes[1..].starts_with(&PN532_ACK_FRAME)
}

/// True iff both checksum invariants hold. Never panics; truncated input
/// (declared length past the buffer end) is simply invalid.
pub fn is_valid_frame(bytes: &[u8]) -> bool {
    validate(bytes).is_ok()
}

/// Location of a checked frame body inside a receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameSpan {
    /// Offset of the preamble.
    pub start: usize,
    /// Offset of the TFI.
    pub data_start: usize,
    /// LEN field: TFI + payload byte count.
    pub len: usize,
}

pub(crate) fn validate(bytes: &[u8]) -> Result<FrameSpan> {
    let start = frame_start(bytes).ok_or_else(|| Error::malformed("missing frame preamble"))?;
    let header = &bytes[start..];
    if header.len() < 5 {
        return Err(Error::malformed("truncated frame header"));
    }

    let len = header[3];
    let lcs_actual = header[4];
    if len.wrapping_add(lcs_actual) != 0 {
        return Err(Error::malformed(format!(
            "length checksum mismatch: len={:#04x} lcs={:#04x}",
            len, lcs_actual
        )));
    }
    if len == 0 {
        return Err(Error::malformed("frame carries no TFI"));
    }

    let len = len as usize;
    let data_start = start + 5;
    let dcs_idx = data_start + len;
    if dcs_idx >= bytes.len() {
        return Err(Error::malformed(format!(
            "declared length {} exceeds buffer of {} bytes",
            len,
            bytes.len()
        )));
    }

    let data = &bytes[data_start..dcs_idx];
    if sum(data).wrapping_add(bytes[dcs_idx]) != 0 {
        return Err(Error::malformed(format!(
            "data checksum mismatch: expected {:#04x}, got {:#04x}",
            dcs(data),
            bytes[dcs_idx]
        )));
    }

    Ok(FrameSpan {
        start,
        data_start,
        len,
    })
}
