// libpn532/src/protocol/responses/target.rs

use crate::card::CardRecord;
use crate::constants::PN532_CMD_IN_LIST_PASSIVE_TARGET;
use crate::protocol::frame::Frame;
use crate::protocol::parser;
use crate::types::Uid;
use crate::{Error, Result};

/// Offsets inside an ISO14443A InListPassiveTarget reply, counted from the
/// preamble (bus status byte already stripped).
///
/// ```text
/// b0..6    frame header: 00 00 FF LEN LCS D5 4B
/// b7       tags found
/// b8       tag number
/// b9..10   SENS_RES
/// b11      SEL_RES
/// b12      NFCID length
/// b13..    NFCID
/// ```
pub const HEADER_LEN: usize = 7;
pub const TAGS_FOUND: usize = 7;
pub const TAG_NUMBER: usize = 8;
pub const SENS_RES: usize = 9;
pub const SEL_RES: usize = 11;
pub const UID_LENGTH: usize = 12;
pub const UID: usize = 13;

/// Decode a card record at the fixed ISO14443A offsets.
///
/// Fails with `MalformedResponse` when no target was listed or the UID
/// would run past the end of `bytes`.
pub fn parse_card_record(bytes: &[u8]) -> Result<CardRecord> {
    let tags_found = parser::byte_at(bytes, TAGS_FOUND)?;
    if tags_found == 0 {
        return Err(Error::malformed("no target listed"));
    }
    let uid_length = parser::byte_at(bytes, UID_LENGTH)?;
    let uid_bytes = parser::slice_at(bytes, UID, uid_length as usize).map_err(|_| {
        Error::malformed(format!(
            "uid length {} runs past reply of {} bytes",
            uid_length,
            bytes.len()
        ))
    })?;
    let uid = Uid::try_from(uid_bytes).map_err(|e| Error::malformed(e.to_string()))?;

    let mut header = [0u8; HEADER_LEN];
    header.copy_from_slice(&bytes[..HEADER_LEN]);

    Ok(CardRecord {
        header,
        tags_found,
        tag_number: bytes[TAG_NUMBER],
        sens_res: [bytes[SENS_RES], bytes[SENS_RES + 1]],
        sel_res: bytes[SEL_RES],
        uid_length,
        uid,
    })
}

/// Validate an InListPassiveTarget reply frame (checksums, TFI, response
/// code) and decode its card record.
pub fn decode_in_list_passive_target(frame: &[u8]) -> Result<CardRecord> {
    let payload = Frame::decode(frame)?;
    parser::expect_response_code(&payload, PN532_CMD_IN_LIST_PASSIVE_TARGET + 1)?;
    let start = crate::protocol::frame::frame_start(frame).unwrap_or(0);
    parse_card_record(&frame[start..])
}
