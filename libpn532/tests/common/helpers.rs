use std::time::Duration;

use libpn532::device::CardPoller;

/// Route `log` output through env_logger's test writer.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Check `cond` on the (usually paused) tokio clock until it holds or
/// `limit` elapses.
pub async fn wait_until(limit: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if cond() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    cond()
}

/// Wait for the poll loop to wind down.
pub async fn wait_for_idle(poller: &CardPoller) -> bool {
    wait_until(Duration::from_secs(5), || !poller.is_active()).await
}
