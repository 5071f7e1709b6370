//! Background poll loop for coil arrivals.
//!
//! [`CoilPoller::start`] spawns a task that asks the [`RemoteCoilSource`]
//! for a pending coil on a fixed interval and hands every result to the
//! session's reconciler. The first check runs immediately.
//!
//! ```text
//!   interval tick ──▶ source.poll().await ──▶ active? ──▶ session.offer_notification()
//!        ▲                                       │ no
//!        └──────────── cancelled? ◀──────────────┘ discard, exit
//! ```
//!
//! Stopping clears the shared `active` flag and cancels the task's token.
//! A check that was already in flight when polling stopped is discarded
//! when it returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::reconciler::OfferOutcome;
use crate::session::SharedSession;
use crate::source::{CoilFeed, RemoteCoilSource};

/// Shortest interval the loop will run at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Snapshot of the arrival machinery for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollingState {
    /// The poll loop is running.
    pub active: bool,
    /// A prompt is open and waiting for the operator.
    pub notification_pending: bool,
}

/// Control handle for a running poll loop.
///
/// Clones share the same loop.
#[derive(Debug, Clone)]
pub struct PollHandle {
    active: Arc<AtomicBool>,
    cancellation: CancellationToken,
}

impl PollHandle {
    fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(true)),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Stops the loop. Safe to call more than once.
    pub fn stop(&self) {
        if self.active.swap(false, Ordering::SeqCst) {
            tracing::info!("Stopping coil polling");
        }
        self.cancellation.cancel();
    }
}

/// Owns the arrival source and at most one running poll loop.
pub struct CoilPoller<F: CoilFeed> {
    source: Arc<RemoteCoilSource<F>>,
    interval: Duration,
    current: Mutex<Option<PollHandle>>,
}

impl<F> CoilPoller<F>
where
    F: CoilFeed + Send + Sync + 'static,
{
    pub fn new(source: RemoteCoilSource<F>, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            interval: interval.max(MIN_POLL_INTERVAL),
            current: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts polling on behalf of `session`.
    ///
    /// If a loop is already running it keeps running and its handle is
    /// returned. Must be called from within a tokio runtime.
    pub fn start(&self, session: SharedSession) -> PollHandle {
        let mut current = self.current.lock();

        if let Some(handle) = current.as_ref().filter(|h| h.is_active()) {
            tracing::info!("Coil polling already active");
            return handle.clone();
        }

        let handle = PollHandle::new();
        tracing::info!(
            poll_interval_ms = self.interval.as_millis() as u64,
            "Starting coil polling"
        );

        tokio::spawn(run_poll_loop(
            Arc::clone(&self.source),
            session,
            handle.clone(),
            self.interval,
        ));

        *current = Some(handle.clone());
        handle
    }

    /// Stops the running loop, if any.
    pub fn stop(&self) {
        if let Some(handle) = self.current.lock().take() {
            handle.stop();
        }
    }

    pub fn is_active(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .is_some_and(PollHandle::is_active)
    }

    pub fn state(&self, session: &SharedSession) -> PollingState {
        PollingState {
            active: self.is_active(),
            notification_pending: session.lock().notification_pending(),
        }
    }
}

async fn run_poll_loop<F: CoilFeed>(
    source: Arc<RemoteCoilSource<F>>,
    session: SharedSession,
    handle: PollHandle,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = handle.cancellation.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let polled = source.poll().await;

        if !handle.is_active() {
            if polled.is_some() {
                tracing::debug!("Arrival reported after polling stopped; discarded");
            }
            break;
        }

        let outcome = session.lock().offer_notification(polled);
        if outcome != OfferOutcome::NothingNew {
            tracing::debug!(?outcome, "Arrival handled");
        }
    }

    tracing::info!("Coil polling stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::BlockLayout;
    use crate::log::NoOpLogger;
    use crate::reconciler::{PresentationError, PromptSurface};
    use crate::session::YardSession;
    use crate::source::{CheckResponse, PendingCoil, SourceError};
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct AutoSurface;

    impl PromptSurface for AutoSurface {
        fn present(&mut self, _coil: &PendingCoil) -> Result<(), PresentationError> {
            Ok(())
        }
    }

    /// Answers every check with the same flag, optionally waiting on a gate.
    #[derive(Default)]
    struct TestFeed {
        new_coil: bool,
        gate: Option<Arc<Notify>>,
        calls: Arc<AtomicUsize>,
    }

    impl CoilFeed for TestFeed {
        async fn check_for_new_coil(&self) -> Result<CheckResponse, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(CheckResponse {
                new_coil: self.new_coil,
                row: self.new_coil.then_some(1),
                column: self.new_coil.then_some(1),
                layer: self.new_coil.then_some(1),
                id: None,
            })
        }
    }

    fn session() -> SharedSession {
        let mut session = YardSession::new(
            BlockLayout::default(),
            Box::new(AutoSurface),
            Arc::new(NoOpLogger),
        )
        .unwrap();
        session.mark_model_loaded();
        session.shared()
    }

    fn poller(feed: TestFeed, interval_ms: u64) -> CoilPoller<TestFeed> {
        let source = RemoteCoilSource::new(feed, Arc::new(NoOpLogger));
        CoilPoller::new(source, Duration::from_millis(interval_ms))
    }

    #[tokio::test]
    async fn test_first_check_is_immediate_and_prompts() {
        let session = session();
        let poller = poller(TestFeed { new_coil: true, ..Default::default() }, 1_000);

        poller.start(session.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(
            poller.state(&session),
            PollingState { active: true, notification_pending: true }
        );
        poller.stop();
    }

    #[tokio::test]
    async fn test_no_checks_after_stop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let feed = TestFeed { calls: calls.clone(), ..Default::default() };
        let poller = poller(feed, 20);

        let handle = poller.start(session());
        tokio::time::sleep(Duration::from_millis(75)).await;
        assert!(calls.load(Ordering::SeqCst) >= 2);

        handle.stop();
        handle.stop();
        assert!(!poller.is_active());

        tokio::time::sleep(Duration::from_millis(30)).await;
        let after_stop = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(calls.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_in_flight_result_discarded_after_stop() {
        let gate = Arc::new(Notify::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let feed = TestFeed {
            new_coil: true,
            gate: Some(gate.clone()),
            calls: calls.clone(),
        };
        let session = session();
        let poller = poller(feed, 1_000);

        let handle = poller.start(session.clone());
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        handle.stop();
        gate.notify_one();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(!session.lock().notification_pending());
        assert!(session.lock().registry().is_empty());
    }

    #[tokio::test]
    async fn test_start_twice_keeps_single_loop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let feed = TestFeed { calls: calls.clone(), ..Default::default() };
        let session = session();
        let poller = poller(feed, 1_000);

        let first = poller.start(session.clone());
        let second = poller.start(session.clone());
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);

        first.stop();
        assert!(!second.is_active());
    }

    #[tokio::test]
    async fn test_restart_after_stop() {
        let session = session();
        let poller = poller(TestFeed::default(), 1_000);

        poller.start(session.clone()).stop();
        let handle = poller.start(session.clone());

        assert!(handle.is_active());
        assert!(poller.is_active());
        poller.stop();
        assert!(!handle.is_active());
    }

    #[test]
    fn test_interval_has_floor() {
        let poller = poller(TestFeed::default(), 0);
        assert_eq!(poller.interval(), MIN_POLL_INTERVAL);
    }
}
