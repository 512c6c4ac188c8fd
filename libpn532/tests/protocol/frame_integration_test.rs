#[path = "../common/mod.rs"]
mod common;

use libpn532::protocol::{Frame, frame_start, is_valid_ack, is_valid_frame};

#[test]
fn captured_firmware_reply_decodes() {
    let raw = common::fixtures::status_prefixed(
        &common::fixtures::hex_bytes("00 00 FF 06 FA D5 03 32 01 06 07 E8 00"),
        1,
    );
    assert_eq!(frame_start(&raw), Some(1));
    assert!(is_valid_frame(&raw));
    let payload = Frame::decode(&raw).expect("frame decode");
    assert_eq!(payload, common::fixtures::firmware_payload());
}

#[test]
fn ack_with_and_without_status_byte() {
    let ack = common::fixtures::hex_bytes("00 00 FF 00 FF 00");
    assert!(is_valid_ack(&ack));
    assert!(is_valid_ack(&common::fixtures::status_prefixed(&ack, 1)));
    // Any other leading byte is not a status byte.
    let mut shifted = vec![0x80];
    shifted.extend_from_slice(&ack);
    assert!(!is_valid_ack(&shifted));
}

#[test]
fn flipping_any_body_byte_invalidates() {
    let frame = common::fixtures::list_target_frame();
    let body_end = frame.len() - 2;
    for idx in 5..body_end {
        let mut bad = frame.clone();
        bad[idx] ^= 0x01;
        assert!(!is_valid_frame(&bad), "accepted flip at {}", idx);
    }
}

#[test]
fn declared_length_beyond_buffer_is_invalid() {
    let mut frame = common::fixtures::list_target_frame();
    frame.truncate(12);
    assert!(!is_valid_frame(&frame));
    assert!(Frame::decode(&frame).is_err());
}
