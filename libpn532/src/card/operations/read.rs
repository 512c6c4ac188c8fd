use crate::constants::MIFARE_BLOCK_LEN;
use crate::device::ExchangeSession;
use crate::protocol::commands::mifare::encode_mifare_read;
use crate::protocol::parser;
use crate::types::{BlockAddress, BlockData};
use crate::{Error, Result};

use super::data_exchange;

/// Read one block; the 16 bytes follow the status byte.
pub async fn read_block(session: &mut ExchangeSession<'_>, block: BlockAddress) -> Result<BlockData> {
    let reply = data_exchange(session, encode_mifare_read(block)).await?;
    if !reply.is_success() {
        return Err(Error::AuthFailure {
            status: reply.status,
        });
    }
    let bytes = parser::slice_at(&reply.data, 0, MIFARE_BLOCK_LEN)?;
    BlockData::try_from(bytes).map_err(|e| Error::malformed(e.to_string()))
}
