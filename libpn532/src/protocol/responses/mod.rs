// libpn532/src/protocol/responses/mod.rs

pub mod exchange;
pub mod system;
pub mod target;

pub use exchange::DataExchangeReply;
pub use system::{decode_firmware_version, decode_sam_configuration};
pub use target::{decode_in_list_passive_target, parse_card_record};
