#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libpn532::device::{Device, DeviceConfig};
use libpn532::test_support;
use libpn532::types::BaudRate;

#[tokio::test(start_paused = true)]
async fn initialize_transitions_and_reports_firmware() -> anyhow::Result<()> {
    common::init_logging();
    let mock = test_support::mock_with_init()?;

    let device = Device::new_with_transport(Box::new(mock.clone()), DeviceConfig::default())?;
    assert_eq!(device.config().wake_up_delay, Duration::from_millis(100));

    let initialized = device.initialize().await?;
    assert_eq!(initialized.firmware_version().version, 1);
    assert_eq!(initialized.firmware_version().revision, 6);
    assert_eq!(mock.resets(), 1);
    assert_eq!(mock.pending(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn initialize_aborts_when_chip_is_silent() {
    let mut mock = libpn532::transport::MockTransport::new();
    mock.set_ready_mode(libpn532::transport::mock::ReadyMode::Never);
    let res = test_support::initialized_mock_device(&mock).await;
    assert!(matches!(res, Err(libpn532::Error::Timeout)));
}

#[tokio::test(start_paused = true)]
async fn triple_size_uid_needs_longer_reply() -> anyhow::Result<()> {
    let uid = [0x04, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99];
    let emu = libpn532::transport::ChipEmulator::with_card(
        libpn532::transport::emulator::EmulatedCard::classic_1k(&uid),
    );

    // Default length cuts a status-prefixed 10-byte UID reply short.
    let dev = test_support::initialized_emulator_device(&emu).await?;
    assert!(matches!(
        dev.read_passive_target(BaudRate::Iso14443A).await,
        Err(libpn532::Error::MalformedResponse(_))
    ));
    drop(dev);

    let dev = test_support::fast_builder()
        .with_transport(Box::new(emu.clone()))
        .list_target_reply_len(24)
        .initialize()
        .await?;
    let card = dev.read_passive_target(BaudRate::Iso14443A).await?;
    assert_eq!(card.uid.as_bytes(), &uid);
    Ok(())
}
