#[path = "../common/mod.rs"]
mod common;

use libpn532::Error;
use libpn532::protocol::responses::target::UID;
use libpn532::protocol::{
    DataExchangeReply, decode_firmware_version, decode_in_list_passive_target, parse_card_record,
};

#[test]
fn synthetic_twenty_byte_list_reply() {
    let reply = common::fixtures::list_target_reply();
    assert_eq!(reply.len(), 20);
    let card = parse_card_record(&reply).unwrap();
    assert_eq!(card.uid_length, 4);
    assert_eq!(card.uid.as_bytes(), &reply[UID..UID + 4]);
    assert_eq!(card.uid.as_bytes(), &common::fixtures::sample_uid_bytes());
    assert!(card.is_mifare_classic());
}

#[test]
fn list_reply_frame_validates_then_parses() {
    let raw = common::fixtures::status_prefixed(&common::fixtures::list_target_frame(), 1);
    let card = decode_in_list_passive_target(&raw).unwrap();
    assert_eq!(card.uid, common::fixtures::sample_uid());
    assert_eq!(card.sens_res, [0x00, 0x04]);
}

#[test]
fn firmware_reply_decodes() {
    let frame = common::fixtures::reply_frame(&common::fixtures::firmware_payload());
    let fw = decode_firmware_version(&frame).unwrap();
    assert_eq!(fw.to_string(), "PN532 firmware 1.6 (support 0x07)");
}

#[test]
fn data_exchange_status_and_data() {
    let mut payload = vec![0x41, 0x00];
    payload.extend_from_slice(&common::fixtures::pattern_block());
    let reply = DataExchangeReply::parse(&common::fixtures::reply_frame(&payload)).unwrap();
    assert!(reply.is_success());
    assert_eq!(reply.data, common::fixtures::pattern_block().to_vec());

    let wrong_code = common::fixtures::reply_frame(&[0x4B, 0x00]);
    assert!(matches!(
        DataExchangeReply::parse(&wrong_code),
        Err(Error::MalformedResponse(_))
    ));
}
