// libpn532/src/prelude.rs

pub use crate::card::{CardRecord, MifareSession};
pub use crate::device::{
    CardPoller, Device, DeviceBuilder, DeviceConfig, Initialized, PollEvent, Subscription,
    Uninitialized,
};
pub use crate::protocol::Command;
pub use crate::transport::Transport;
pub use crate::{
    BaudRate, BlockAddress, BlockData, Error, FirmwareVersion, KeyType, MifareKey, Result, Uid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, format_uid, ms, parse_hex};
