#[path = "../common/mod.rs"]
mod common;

use libpn532::card::{is_first_block_in_sector, sector_of, sector_trailer};
use libpn532::test_support;
use libpn532::types::BaudRate;

#[test]
fn first_blocks_of_1k_and_4k() {
    let small: Vec<u8> = (0u8..128).filter(|b| is_first_block_in_sector(*b)).collect();
    assert_eq!(small.len(), 32);
    assert!(small.iter().all(|b| b % 4 == 0));

    let large: Vec<u8> = (128u8..=255).filter(|b| is_first_block_in_sector(*b)).collect();
    assert_eq!(large, vec![128, 144, 160, 176, 192, 208, 224, 240]);
}

#[test]
fn trailer_and_sector_agree() {
    for block in 0u8..=255 {
        let trailer = sector_trailer(block);
        assert_eq!(sector_of(trailer), sector_of(block), "block {}", block);
        assert!(trailer >= block);
        assert!(!is_first_block_in_sector(trailer));
    }
}

// Authenticate once per sector, then dump the data blocks, the way a card
// inventory tool walks a 1K card.
#[tokio::test(start_paused = true)]
async fn scan_first_sectors() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;
    let card = dev.read_passive_target(BaudRate::Iso14443A).await?;
    let session = dev.mifare();
    let key = common::fixtures::default_key_a();

    session
        .write_block_authenticated(&card.uid, 9, &key, &common::fixtures::pattern_block())
        .await?;

    let mut dumped = Vec::new();
    for block in 0u8..12 {
        if is_first_block_in_sector(block) {
            session.authenticate_block(&card.uid, block, &key).await?;
        }
        if block != sector_trailer(block) {
            dumped.push(session.read_block(block).await?);
        }
    }
    assert_eq!(dumped.len(), 9);
    assert_eq!(dumped[7].as_bytes(), &common::fixtures::pattern_block());
    Ok(())
}
