// libpn532/src/types.rs

use crate::constants::{MIFARE_BLOCK_LEN, MIFARE_CMD_AUTH_A, MIFARE_CMD_AUTH_B, MIFARE_KEY_LEN};
use crate::{Error, Result};
use derive_more::{Display, From};
use std::convert::TryFrom;

/// Largest UID an ISO14443A card reports (triple size).
pub const MAX_UID_LEN: usize = 10;

/// Card UID / NFCID1 (4, 7 or 10 bytes)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uid(Vec<u8>);

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::utils::format_uid(&self.0))
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() || bytes.len() > MAX_UID_LEN {
            return Err(Error::invalid_argument(format!(
                "uid must be 1..={} bytes, got {}",
                MAX_UID_LEN,
                bytes.len()
            )));
        }
        Ok(Self(bytes.to_vec()))
    }
}

/// Mifare Classic key slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyType {
    #[display(fmt = "A")]
    A,
    #[display(fmt = "B")]
    B,
}

impl KeyType {
    /// Numeric key selector as used by older callers: 0 selects key A,
    /// anything else key B.
    pub fn from_key_number(n: u8) -> Self {
        if n == 0 { KeyType::A } else { KeyType::B }
    }

    /// Mifare authentication command byte for this key slot.
    pub fn auth_command(self) -> u8 {
        match self {
            KeyType::A => MIFARE_CMD_AUTH_A,
            KeyType::B => MIFARE_CMD_AUTH_B,
        }
    }
}

/// Mifare Classic sector key: slot plus 6 secret bytes.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MifareKey {
    key_type: KeyType,
    secret: [u8; MIFARE_KEY_LEN],
}

impl MifareKey {
    /// Factory default transport key (FF FF FF FF FF FF).
    pub const DEFAULT_SECRET: [u8; MIFARE_KEY_LEN] = [0xFF; MIFARE_KEY_LEN];

    pub fn new(key_type: KeyType, secret: [u8; MIFARE_KEY_LEN]) -> Self {
        Self { key_type, secret }
    }

    /// Build a key from a slice, rejecting anything that is not 6 bytes.
    pub fn from_slice(key_type: KeyType, secret: &[u8]) -> Result<Self> {
        let secret: [u8; MIFARE_KEY_LEN] = secret.try_into().map_err(|_| {
            Error::invalid_argument(format!(
                "mifare key must be {} bytes, got {}",
                MIFARE_KEY_LEN,
                secret.len()
            ))
        })?;
        Ok(Self::new(key_type, secret))
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    pub fn secret(&self) -> &[u8; MIFARE_KEY_LEN] {
        &self.secret
    }
}

// Keep secrets out of logs.
impl std::fmt::Debug for MifareKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MifareKey")
            .field("key_type", &self.key_type)
            .finish_non_exhaustive()
    }
}

/// Mifare Classic block number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "block {}", _0)]
pub struct BlockAddress(u8);

impl BlockAddress {
    pub const fn new(block: u8) -> Self {
        Self(block)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }
}

/// BlockData (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockData([u8; MIFARE_BLOCK_LEN]);

impl BlockData {
    pub fn from_bytes(bytes: [u8; MIFARE_BLOCK_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; MIFARE_BLOCK_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }

    pub fn to_ascii_safe(&self) -> String {
        self.0
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect()
    }
}

impl TryFrom<&[u8]> for BlockData {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; MIFARE_BLOCK_LEN] = bytes.try_into().map_err(|_| {
            Error::invalid_argument(format!(
                "block data must be {} bytes, got {}",
                MIFARE_BLOCK_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }
}

/// Target modulation / baud rate selector for InListPassiveTarget
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaudRate {
    /// 106 kbps ISO14443A (Mifare)
    #[default]
    Iso14443A = 0x00,
    /// 212 kbps FeliCa
    FeliCa212 = 0x01,
    /// 424 kbps FeliCa
    FeliCa424 = 0x02,
    /// 106 kbps ISO14443B
    Iso14443B = 0x03,
    /// 106 kbps Innovision Jewel
    Jewel = 0x04,
}

/// Chip identity reported by GetFirmwareVersion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirmwareVersion {
    pub ic: u8,
    pub version: u8,
    pub revision: u8,
    pub support: u8,
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PN5{:02x} firmware {}.{} (support {:#04x})",
            self.ic, self.version, self.revision, self.support
        )
    }
}
