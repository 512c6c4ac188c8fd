#[path = "../common/mod.rs"]
mod common;

use libpn532::protocol::{Command, Frame, decode_in_list_passive_target, is_valid_ack};
use libpn532::transport::Transport;
use libpn532::transport::emulator::{ChipEmulator, EmulatedCard};
use libpn532::types::BaudRate;

#[tokio::test]
async fn bare_reads_without_status_byte() {
    let mut emu = ChipEmulator::with_card(EmulatedCard::classic_1k(
        &common::fixtures::sample_uid_bytes(),
    ));
    emu.set_status_byte(false);

    emu.send(&Command::list_passive_target(BaudRate::Iso14443A).encode())
        .await
        .unwrap();
    let ack = emu.receive(8).await.unwrap();
    assert_eq!(&ack[..6], &[0x00, 0x00, 0xFF, 0x00, 0xFF, 0x00]);
    assert!(is_valid_ack(&ack));

    let reply = emu.receive(22).await.unwrap();
    let frame = common::fixtures::list_target_frame();
    assert_eq!(&reply[..frame.len()], &frame[..]);
    let card = decode_in_list_passive_target(&reply).unwrap();
    assert_eq!(card.uid, common::fixtures::sample_uid());
}

#[tokio::test]
async fn reset_discards_pending_replies() {
    let mut emu = ChipEmulator::new();
    emu.send(&Command::GetFirmwareVersion.encode()).await.unwrap();
    assert!(emu.poll_ready().await.unwrap());
    emu.reset().await.unwrap();
    assert!(!emu.poll_ready().await.unwrap());
    assert_eq!(emu.resets(), 1);
}

#[tokio::test]
async fn unknown_command_gets_bare_response_code() {
    let mut emu = ChipEmulator::new();
    let cmd = Command::raw(0x32, vec![0x05, 0xFF, 0x01, 0x02], 8).unwrap(); // RFConfiguration
    emu.send(&cmd.encode()).await.unwrap();
    emu.receive(8).await.unwrap();
    let reply = emu.receive(10).await.unwrap();
    assert_eq!(Frame::decode(&reply).unwrap(), vec![0x33]);
}
