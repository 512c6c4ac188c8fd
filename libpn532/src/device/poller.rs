// libpn532/src/device/poller.rs

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, warn};
use tokio::runtime::Handle;
use tokio::sync::{Notify, broadcast};

use crate::card::CardRecord;
use crate::device::exchange::CommandExchange;
use crate::protocol::{Command, decode_in_list_passive_target};
use crate::types::BaudRate;
use crate::utils::timeout::to_millis;
use crate::{Error, Result};

/// Buffered events per subscriber before the slowest one starts lagging.
const EVENT_CAPACITY: usize = 16;

/// Outcome of one poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    Card(CardRecord),
    Error(Error),
}

#[derive(Debug, Default)]
struct PollState {
    subscribers: usize,
    running: bool,
    stopped: bool,
}

struct Shared {
    state: Mutex<PollState>,
    period_ms: AtomicU64,
    events: broadcast::Sender<PollEvent>,
    /// Cuts the between-cycle sleep short once the loop should wind down.
    wake: Notify,
}

/// Continuous card-present polling, gated by the number of live
/// subscriptions.
///
/// The loop runs while at least one [`Subscription`] exists and polling has
/// not been stopped. Subscriber bookkeeping and the start/stop decisions
/// share one lock, so a subscribe racing a loop that is winding down keeps
/// that loop alive instead of spawning a second one.
#[derive(Clone)]
pub struct CardPoller {
    shared: Arc<Shared>,
    exchange: CommandExchange,
    runtime: Handle,
    baud: BaudRate,
    reply_len: usize,
}

impl std::fmt::Debug for CardPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("CardPoller")
            .field("subscribers", &state.subscribers)
            .field("running", &state.running)
            .field("stopped", &state.stopped)
            .field("period", &self.poll_period())
            .finish()
    }
}

impl CardPoller {
    pub(crate) fn new(
        exchange: CommandExchange,
        runtime: Handle,
        period: Duration,
        baud: BaudRate,
        reply_len: usize,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PollState::default()),
                period_ms: AtomicU64::new(to_millis(period)),
                events,
                wake: Notify::new(),
            }),
            exchange,
            runtime,
            baud,
            reply_len,
        }
    }

    fn state(&self) -> MutexGuard<'_, PollState> {
        self.shared.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a subscriber. The first one starts the poll loop.
    pub fn subscribe(&self) -> Subscription {
        let rx = self.shared.events.subscribe();
        let spawn = {
            let mut state = self.state();
            state.subscribers += 1;
            debug!("poller subscribe: {} subscriber(s)", state.subscribers);
            Self::claim_loop(&mut state)
        };
        if spawn {
            self.spawn_loop();
        }
        Subscription {
            rx,
            poller: Some(self.clone()),
        }
    }

    fn release(&self) {
        let mut state = self.state();
        state.subscribers = state.subscribers.saturating_sub(1);
        debug!("poller unsubscribe: {} subscriber(s)", state.subscribers);
        if state.subscribers == 0 && state.running {
            self.shared.wake.notify_one();
        }
    }

    /// Stop polling after the in-flight cycle, even with subscribers.
    pub fn stop(&self) {
        let mut state = self.state();
        state.stopped = true;
        debug!("poller stopped");
        if state.running {
            self.shared.wake.notify_one();
        }
    }

    /// Undo `stop()`; the loop restarts right away if anyone is subscribed.
    pub fn start(&self) {
        let spawn = {
            let mut state = self.state();
            state.stopped = false;
            Self::claim_loop(&mut state)
        };
        if spawn {
            self.spawn_loop();
        }
    }

    pub fn set_poll_period(&self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(Error::invalid_argument("poll period must be non-zero"));
        }
        self.shared.period_ms.store(to_millis(period), Ordering::Relaxed);
        Ok(())
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.shared.period_ms.load(Ordering::Relaxed))
    }

    pub fn subscriber_count(&self) -> usize {
        self.state().subscribers
    }

    /// True while the poll loop task is alive.
    pub fn is_active(&self) -> bool {
        self.state().running
    }

    pub fn is_stopped(&self) -> bool {
        self.state().stopped
    }

    /// Mark the loop as running if it should be and is not yet. Returns
    /// whether the caller must spawn it.
    fn claim_loop(state: &mut PollState) -> bool {
        if state.subscribers > 0 && !state.stopped && !state.running {
            state.running = true;
            true
        } else {
            false
        }
    }

    fn spawn_loop(&self) {
        let poller = self.clone();
        self.runtime.spawn(async move { poller.run().await });
    }

    async fn run(self) {
        debug!("card poll loop started");
        let cmd = Command::list_passive_target(self.baud);
        loop {
            {
                let mut state = self.state();
                if state.subscribers == 0 || state.stopped {
                    state.running = false;
                    break;
                }
            }

            let event = match self.poll_once(&cmd).await {
                Ok(card) => PollEvent::Card(card),
                Err(e) => {
                    warn!("poll cycle failed: {}", e);
                    PollEvent::Error(e)
                }
            };
            // No receivers left is fine; the next check ends the loop.
            let _ = self.shared.events.send(event);

            tokio::select! {
                _ = tokio::time::sleep(self.poll_period()) => {}
                _ = self.shared.wake.notified() => {}
            }
        }
        debug!("card poll loop exited");
    }

    async fn poll_once(&self, cmd: &Command) -> Result<CardRecord> {
        let frame = self
            .exchange
            .exchange_queued_with_len(cmd, self.reply_len)
            .await?;
        decode_in_list_passive_target(&frame)
    }
}

/// A live registration with the poller. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<PollEvent>,
    poller: Option<CardPoller>,
}

impl Subscription {
    /// Next poll event. Events missed because this subscriber fell behind
    /// are skipped.
    pub async fn recv(&mut self) -> Option<PollEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("subscriber lagged, {} poll event(s) dropped", n);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next card, skipping error events.
    pub async fn next_card(&mut self) -> Option<CardRecord> {
        loop {
            if let PollEvent::Card(card) = self.recv().await? {
                return Some(card);
            }
        }
    }

    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
