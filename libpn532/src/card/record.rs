// libpn532/src/card/record.rs

use crate::types::Uid;

/// One ISO14443A target as reported by InListPassiveTarget.
///
/// Built fresh for every successful poll cycle or explicit read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRecord {
    /// Raw framing bytes (preamble through response code), kept for
    /// diagnostics.
    pub header: [u8; 7],
    pub tags_found: u8,
    pub tag_number: u8,
    pub sens_res: [u8; 2],
    pub sel_res: u8,
    pub uid_length: u8,
    pub uid: Uid,
}

impl CardRecord {
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// SEL_RES bit 3 set with bit 5 clear marks a Mifare Classic
    /// compatible tag.
    pub fn is_mifare_classic(&self) -> bool {
        self.sel_res & 0x08 != 0 && self.sel_res & 0x20 == 0
    }
}
