// libpn532/src/protocol/commands/target.rs

use crate::types::BaudRate;

/// Encode InListPassiveTarget parameters: MaxTg, BrTy.
///
/// The PN532 handles at most two targets at once; larger requests are
/// clamped.
pub fn encode_in_list_passive_target(max_targets: u8, baud: BaudRate) -> Vec<u8> {
    vec![max_targets.clamp(1, 2), baud as u8]
}
