//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize device setup over the mock transport and the
//! chip emulator so tests across the crate and tests/ directory share it.
#![allow(dead_code)]

use std::time::Duration;

use crate::device::{Device, DeviceBuilder, Initialized};
use crate::transport::emulator::{ChipEmulator, EmulatedCard};
use crate::transport::mock::MockTransport;
use crate::Result;

/// UID of the card placed in the field by [`emulator_with_card`].
pub const TEST_UID: [u8; 4] = [0xCA, 0x3D, 0x67, 0x4F];

/// Chip emulator with a fresh Mifare Classic 1K (UID [`TEST_UID`]) in the
/// field.
#[doc(hidden)]
pub fn emulator_with_card() -> ChipEmulator {
    ChipEmulator::with_card(EmulatedCard::classic_1k(&TEST_UID))
}

/// MockTransport pre-seeded with the two exchanges `initialize` performs
/// (firmware version 1.6, SAM configuration).
#[doc(hidden)]
pub fn mock_with_init() -> Result<MockTransport> {
    let mock = MockTransport::new();
    seed_init(&mock)?;
    Ok(mock)
}

/// Queue the start-up handshake replies on `mock`.
#[doc(hidden)]
pub fn seed_init(mock: &MockTransport) -> Result<()> {
    mock.push_exchange(&[0x03, 0x32, 0x01, 0x06, 0x07])?;
    mock.push_exchange(&[0x15])
}

/// Builder with short timings so paused-clock tests stay quick to read.
#[doc(hidden)]
pub fn fast_builder() -> DeviceBuilder {
    DeviceBuilder::new()
        .poll_period(Duration::from_millis(50))
        .exchange_timeout(Duration::from_millis(200))
}

/// Initialize a device over a clone of `emu`, keeping the caller's handle
/// usable for inspection and fault injection.
#[doc(hidden)]
pub async fn initialized_emulator_device(emu: &ChipEmulator) -> Result<Device<Initialized>> {
    fast_builder()
        .with_transport(Box::new(emu.clone()))
        .initialize()
        .await
}

/// Same as [`initialized_emulator_device`] over a MockTransport; the
/// handshake replies must already be queued (see [`seed_init`]).
#[doc(hidden)]
pub async fn initialized_mock_device(mock: &MockTransport) -> Result<Device<Initialized>> {
    fast_builder()
        .with_transport(Box::new(mock.clone()))
        .initialize()
        .await
}
