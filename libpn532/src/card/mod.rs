// libpn532/src/card/mod.rs

use crate::device::CommandExchange;
use crate::types::{BlockAddress, BlockData, MifareKey, Uid};
use crate::Result;

mod record;
pub use record::CardRecord;

pub mod operations;

/// Blocks below this address belong to 4-block sectors; above it (4K cards
/// only) sectors span 16 blocks.
pub const SMALL_SECTOR_LIMIT: u8 = 128;

/// Mifare Classic block access over the device's command exchange.
///
/// Every call holds the chip for its whole duration and fails with `Busy`
/// up front while another exchange (a poll cycle, say) holds it. The
/// two-step calls run both exchanges under one hold, so no poll cycle can
/// land between authentication and the block access.
#[derive(Debug, Clone)]
pub struct MifareSession {
    exchange: CommandExchange,
}

impl MifareSession {
    pub fn new(exchange: CommandExchange) -> Self {
        Self { exchange }
    }

    /// Authenticate the sector holding `block` for the card with `uid`.
    /// A non-zero chip status becomes `AuthFailure`.
    pub async fn authenticate_block(
        &self,
        uid: &Uid,
        block: u8,
        key: &MifareKey,
    ) -> Result<()> {
        let mut session = self.exchange.try_session()?;
        operations::auth::authenticate(&mut session, uid, BlockAddress::new(block), key).await
    }

    /// Read one 16-byte block. The sector must be authenticated.
    pub async fn read_block(&self, block: u8) -> Result<BlockData> {
        let mut session = self.exchange.try_session()?;
        operations::read::read_block(&mut session, BlockAddress::new(block)).await
    }

    /// Write exactly 16 bytes to one block. Any other length is rejected
    /// before the chip is touched.
    pub async fn write_block(&self, block: u8, data: &[u8]) -> Result<()> {
        let data = BlockData::try_from(data)?;
        let mut session = self.exchange.try_session()?;
        operations::write::write_block(&mut session, BlockAddress::new(block), &data).await
    }

    /// Authenticate then read, as one call.
    pub async fn read_block_authenticated(
        &self,
        uid: &Uid,
        block: u8,
        key: &MifareKey,
    ) -> Result<BlockData> {
        let block = BlockAddress::new(block);
        let mut session = self.exchange.try_session()?;
        operations::auth::authenticate(&mut session, uid, block, key).await?;
        operations::read::read_block(&mut session, block).await
    }

    /// Authenticate then write, as one call.
    pub async fn write_block_authenticated(
        &self,
        uid: &Uid,
        block: u8,
        key: &MifareKey,
        data: &[u8],
    ) -> Result<()> {
        let data = BlockData::try_from(data)?;
        let block = BlockAddress::new(block);
        let mut session = self.exchange.try_session()?;
        operations::auth::authenticate(&mut session, uid, block, key).await?;
        operations::write::write_block(&mut session, block, &data).await
    }
}

/// First block of its sector (the one a sector scan authenticates).
pub fn is_first_block_in_sector(block: u8) -> bool {
    if block < SMALL_SECTOR_LIMIT {
        block % 4 == 0
    } else {
        block % 16 == 0
    }
}

/// Sector number holding `block`, for 1K and 4K layouts.
pub fn sector_of(block: u8) -> u8 {
    if block < SMALL_SECTOR_LIMIT {
        block / 4
    } else {
        32 + (block - SMALL_SECTOR_LIMIT) / 16
    }
}

/// Address of the trailer (keys and access bits) of `block`'s sector.
pub fn sector_trailer(block: u8) -> u8 {
    if block < SMALL_SECTOR_LIMIT {
        block | 0x03
    } else {
        block | 0x0F
    }
}
