#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libpn532::Error;
use libpn532::device::ExchangeState;
use libpn532::protocol::Command;
use libpn532::test_support;
use libpn532::transport::emulator::Fault;

#[tokio::test(start_paused = true)]
async fn timeout_follows_runtime_setting() -> anyhow::Result<()> {
    common::init_logging();
    let emu = test_support::emulator_with_card();
    let mut dev = test_support::initialized_emulator_device(&emu).await?;

    dev.set_exchange_timeout(Duration::from_millis(1_000))?;
    emu.inject(Fault::Silent);
    let started = tokio::time::Instant::now();
    assert_eq!(
        dev.exchange(&Command::GetFirmwareVersion).await,
        Err(Error::Timeout)
    );
    let waited = started.elapsed();
    assert!(waited >= Duration::from_millis(1_000), "waited {:?}", waited);
    assert!(waited < Duration::from_millis(1_100), "waited {:?}", waited);
    assert_eq!(dev.exchange_handle().state(), ExchangeState::Failed);

    // The next exchange is unaffected.
    let data = dev.execute(&Command::GetFirmwareVersion).await?;
    assert_eq!(data, vec![0x32, 0x01, 0x06, 0x07]);
    assert_eq!(dev.exchange_handle().state(), ExchangeState::Done);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn user_exchange_rejected_while_poll_in_flight() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;

    // Hold the transport with a poll cycle whose reply never comes.
    emu.inject(Fault::NoReply);
    let _sub = dev.subscribe();
    assert!(common::wait_until(Duration::from_millis(100), || dev.exchange_handle().is_busy()).await);

    assert_eq!(
        dev.execute(&Command::GetFirmwareVersion).await,
        Err(Error::Busy)
    );
    assert_eq!(
        dev.read_passive_target(libpn532::types::BaudRate::Iso14443A).await,
        Err(Error::Busy)
    );
    let session = dev.mifare();
    assert_eq!(session.read_block(4).await, Err(Error::Busy));
    let key = common::fixtures::default_key_a();
    let uid = common::fixtures::sample_uid();
    assert_eq!(
        session.read_block_authenticated(&uid, 4, &key).await,
        Err(Error::Busy)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn nack_surfaces_as_ack_invalid() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;
    emu.inject(Fault::BadAck);
    assert_eq!(
        dev.exchange(&Command::sam_normal()).await,
        Err(Error::AckInvalid)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn raw_command_passes_through() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;
    // ReadRegister-style command: the emulator answers with the bare code.
    let cmd = Command::raw(0x06, vec![0x63, 0x02], 8)?;
    let data = dev.execute(&cmd).await?;
    assert!(data.is_empty());
    assert_eq!(emu.sent().last().map(|f| f[6]), Some(0x06));
    Ok(())
}
