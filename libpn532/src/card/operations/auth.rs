use log::debug;

use crate::device::ExchangeSession;
use crate::protocol::commands::mifare::encode_mifare_auth;
use crate::types::{BlockAddress, MifareKey, Uid};
use crate::{Error, Result};

use super::data_exchange;

/// Authenticate the sector containing `block` with `key`.
pub async fn authenticate(
    session: &mut ExchangeSession<'_>,
    uid: &Uid,
    block: BlockAddress,
    key: &MifareKey,
) -> Result<()> {
    let reply = data_exchange(session, encode_mifare_auth(block, key, uid)).await?;
    if !reply.is_success() {
        debug!(
            "key {} rejected for {} of {}: status {:#04x}",
            key.key_type(),
            block,
            uid,
            reply.status
        );
        return Err(Error::AuthFailure {
            status: reply.status,
        });
    }
    Ok(())
}
