#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libpn532::Error;
use libpn532::device::PollEvent;
use libpn532::test_support;
use libpn532::transport::emulator::Fault;

#[tokio::test(start_paused = true)]
async fn subscribe_subscribe_unsubscribe() -> anyhow::Result<()> {
    common::init_logging();
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;
    let poller = dev.poller();

    let first = poller.subscribe();
    let second = poller.subscribe();
    first.unsubscribe();
    assert!(poller.is_active());
    assert_eq!(poller.subscriber_count(), 1);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(poller.is_active());

    second.unsubscribe();
    assert_eq!(poller.subscriber_count(), 0);
    assert!(common::wait_for_idle(poller).await);

    // No further cycles once idle.
    let polls = emu.list_requests();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(emu.list_requests(), polls);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn resubscribe_restarts_loop() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;

    drop(dev.subscribe());
    assert!(common::wait_for_idle(dev.poller()).await);

    let mut sub = dev.subscribe();
    assert!(dev.poller().is_active());
    let card = sub.next_card().await.expect("card event");
    assert_eq!(card.uid, test_support_uid());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn every_subscriber_sees_the_card() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;
    let mut a = dev.subscribe();
    let mut b = dev.subscribe();
    assert_eq!(a.next_card().await.map(|c| c.uid), Some(test_support_uid()));
    assert_eq!(b.next_card().await.map(|c| c.uid), Some(test_support_uid()));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn failed_cycle_is_reported_and_polling_continues() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;

    emu.inject(Fault::CorruptReply);
    let mut sub = dev.subscribe();
    match sub.recv().await {
        Some(PollEvent::Error(Error::MalformedResponse(_))) => {}
        other => panic!("expected malformed-response event, got {:?}", other),
    }
    match sub.recv().await {
        Some(PollEvent::Card(card)) => assert_eq!(card.uid, test_support_uid()),
        other => panic!("expected card event, got {:?}", other),
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn no_card_yields_timeouts() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let dev = test_support::initialized_emulator_device(&emu).await?;
    emu.remove_card();

    let mut sub = dev.subscribe();
    assert_eq!(sub.recv().await, Some(PollEvent::Error(Error::Timeout)));

    emu.insert_card(libpn532::transport::emulator::EmulatedCard::classic_1k(
        &test_support::TEST_UID,
    ));
    assert!(sub.next_card().await.is_some());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn stop_halts_with_subscribers_and_start_resumes() -> anyhow::Result<()> {
    let emu = test_support::emulator_with_card();
    let mut dev = test_support::initialized_emulator_device(&emu).await?;
    dev.set_poll_period(Duration::from_millis(20))?;

    let mut sub = dev.subscribe();
    sub.next_card().await.expect("card before stop");

    dev.poller().stop();
    assert!(dev.poller().is_stopped());
    assert!(common::wait_for_idle(dev.poller()).await);
    assert_eq!(dev.poller().subscriber_count(), 1);
    let polls = emu.list_requests();
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(emu.list_requests(), polls);

    dev.poller().start();
    assert!(!dev.poller().is_stopped());
    assert!(dev.poller().is_active());
    assert!(common::wait_until(Duration::from_secs(1), || emu.list_requests() > polls).await);
    Ok(())
}

fn test_support_uid() -> libpn532::Uid {
    libpn532::Uid::try_from(&test_support::TEST_UID[..]).unwrap()
}
