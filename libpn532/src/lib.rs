// libpn532/src/lib.rs

//! libpn532
//!
//! Pure Rust async driver for the NXP PN532 NFC front-end: frame codec,
//! serialised command exchange, continuous card polling and Mifare Classic
//! block access.

pub mod card;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available everywhere.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
