#[path = "../common/mod.rs"]
mod common;

use libpn532::protocol::{dcs, lcs};

#[test]
fn lcs_and_dcs_examples() {
    assert_eq!(lcs(3), 0xfd);
    assert_eq!(lcs(0), 0x00);
    assert_eq!(lcs(0xff), 0x01);

    // SAMConfiguration body: D4 14 01 14 01
    assert_eq!(dcs(&[0xD4, 0x14, 0x01, 0x14, 0x01]), 0x02);
    assert_eq!(dcs(&[]), 0x00);
}

#[test]
fn checksums_close_captured_frame() {
    let frame = common::fixtures::hex_bytes("00 00 FF 06 FA D5 03 32 01 06 07 E8 00");
    assert_eq!(frame[3].wrapping_add(frame[4]), 0);
    assert_eq!(dcs(&frame[5..11]), frame[11]);
}
