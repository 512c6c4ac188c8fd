// libpn532/src/device/mod.rs

pub mod builder;
pub mod config;
pub mod exchange;
pub mod handle;
pub mod poller;

pub use builder::DeviceBuilder;
pub use config::DeviceConfig;
pub use exchange::{CommandExchange, ExchangeSession, ExchangeState};
pub use handle::{Device, Initialized, Uninitialized};
pub use poller::{CardPoller, PollEvent, Subscription};
