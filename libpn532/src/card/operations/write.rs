use crate::device::ExchangeSession;
use crate::protocol::commands::mifare::encode_mifare_write;
use crate::types::{BlockAddress, BlockData};
use crate::{Error, Result};

use super::data_exchange;

/// Write one block. The chip only reports a status byte.
pub async fn write_block(session: &mut ExchangeSession<'_>, block: BlockAddress, data: &BlockData) -> Result<()> {
    let reply = data_exchange(session, encode_mifare_write(block, data)).await?;
    if !reply.is_success() {
        return Err(Error::AuthFailure {
            status: reply.status,
        });
    }
    Ok(())
}
