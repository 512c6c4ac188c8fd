#[path = "../common/mod.rs"]
mod common;

use std::time::Duration;

use libpn532::Error;
use libpn532::transport::Transport;
use libpn532::transport::mock::{MockTransport, ReadyMode};

#[tokio::test]
async fn mock_transport_send_and_receive() {
    let mut m = MockTransport::new();
    m.push_response(vec![0x01, 0x02, 0x03]);
    m.send(&[0xAA]).await.unwrap();
    assert_eq!(m.sent(), vec![vec![0xAA]]);
    // Reads are truncated to the requested size.
    assert_eq!(m.receive(2).await.unwrap(), vec![0x01, 0x02]);
}

#[tokio::test]
async fn send_failure_and_recovery() {
    let mut m = MockTransport::new();
    m.set_send_failures(1);
    assert!(matches!(m.send(&[0x01]).await, Err(Error::Transport(_))));
    m.send(&[0x01]).await.unwrap();
    assert_eq!(m.sent().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn always_ready_returns_immediately() {
    let mut m = MockTransport::new();
    m.set_ready_mode(ReadyMode::Always);
    let started = tokio::time::Instant::now();
    m.await_ready(Duration::from_millis(500), Duration::from_millis(10))
        .await
        .unwrap();
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn readiness_follows_queue() {
    let mut m = MockTransport::new();
    assert!(!m.poll_ready().await.unwrap());
    m.push_ack();
    assert!(m.poll_ready().await.unwrap());
    let ack = m.receive(8).await.unwrap();
    assert!(libpn532::protocol::is_valid_ack(&ack));
    assert_eq!(
        m.await_ready(Duration::from_millis(50), Duration::from_millis(10))
            .await,
        Err(Error::Timeout)
    );
}
