// libpn532/src/transport/mod.rs

pub mod emulator;
pub mod mock;
pub mod traits;

pub use emulator::ChipEmulator;
pub use mock::MockTransport;
pub use traits::Transport;
