//! Mifare Classic card commands carried inside InDataExchange.

pub mod auth;
pub mod read;
pub mod write;

use crate::device::ExchangeSession;
use crate::protocol::commands::mifare::DEFAULT_TARGET;
use crate::protocol::{Command, DataExchangeReply};
use crate::Result;

/// Send one card command to the listed target and parse the chip's reply.
pub(crate) async fn data_exchange(
    session: &mut ExchangeSession<'_>,
    card_cmd: Vec<u8>,
) -> Result<DataExchangeReply> {
    let cmd = Command::in_data_exchange(DEFAULT_TARGET, card_cmd)?;
    let frame = session.exchange(&cmd).await?;
    DataExchangeReply::parse(&frame)
}
