//! Small helpers shared across the crate: hex formatting for UIDs and
//! blocks, and timing defaults.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
