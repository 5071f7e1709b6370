//! Remote arrival source.
//!
//! Asks the yard backend whether a new coil is waiting to be stored.
//!
//! ```text
//! RemoteCoilSource::poll()
//!     │
//!     ├── Connectivity::is_online()   (offline ⇒ None, no request)
//!     │
//!     └── CoilFeed::check_for_new_coil() → CheckResponse → PendingCoil
//! ```
//!
//! `poll` never fails: transport errors, bad statuses and malformed bodies
//! are reported to the [`Logger`] and read as "no new coil", so the poll
//! loop can keep going through transient outages.

mod client;
mod config;
mod connectivity;
mod error;

use std::sync::Arc;

pub use client::{CheckResponse, CoilFeed, FeedId, HttpCoilFeed, PendingCoil};
pub use config::{
    SourceConfig, CHECK_FOR_NEW_COIL_PATH, DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_POLL_INTERVAL_SECS,
};
pub use connectivity::{AlwaysOnline, Connectivity, SharedConnectivity};
pub use error::SourceError;

use crate::log::Logger;
use crate::{log_debug, log_error, log_warn};

/// Polls a [`CoilFeed`] for pending coil arrivals.
///
/// Holds no state between polls apart from the connectivity handle.
pub struct RemoteCoilSource<F: CoilFeed> {
    feed: F,
    connectivity: Arc<dyn Connectivity>,
    logger: Arc<dyn Logger>,
}

impl<F: CoilFeed> RemoteCoilSource<F> {
    /// Source that assumes it is always online.
    pub fn new(feed: F, logger: Arc<dyn Logger>) -> Self {
        Self::with_connectivity(feed, Arc::new(AlwaysOnline), logger)
    }

    pub fn with_connectivity(
        feed: F,
        connectivity: Arc<dyn Connectivity>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            feed,
            connectivity,
            logger,
        }
    }

    /// One arrival check. `None` for "nothing waiting" and for every failure.
    pub async fn poll(&self) -> Option<PendingCoil> {
        match self.check().await {
            Ok(pending) => pending,
            Err(SourceError::Offline) => {
                log_warn!(self.logger, "Offline: cannot check for new coils");
                None
            }
            Err(SourceError::Status(code)) => {
                log_error!(self.logger, "API error: HTTP {}", code);
                None
            }
            Err(e) => {
                log_error!(self.logger, "Failed to check for new coil: {}", e);
                None
            }
        }
    }

    /// Like [`poll`](Self::poll) but surfaces the failure.
    pub async fn check(&self) -> Result<Option<PendingCoil>, SourceError> {
        if !self.connectivity.is_online() {
            return Err(SourceError::Offline);
        }

        let response = self.feed.check_for_new_coil().await?;
        let pending = response.into_pending()?;

        if let Some(p) = &pending {
            log_debug!(
                self.logger,
                "Backend reports new coil (slot: {:?}, id: {:?})",
                p.slot,
                p.id
            );
        }
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SlotCoord;
    use crate::log::{LogLevel, MemoryLogger};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Feed that replays canned results and counts requests.
    struct ScriptedFeed {
        results: Mutex<Vec<Result<CheckResponse, SourceError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFeed {
        fn new(results: Vec<Result<CheckResponse, SourceError>>) -> Self {
            Self {
                results: Mutex::new(results),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl CoilFeed for ScriptedFeed {
        async fn check_for_new_coil(&self) -> Result<CheckResponse, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut results = self.results.lock();
            if results.is_empty() {
                return Err(SourceError::Http("script exhausted".to_string()));
            }
            results.remove(0)
        }
    }

    fn response(new_coil: bool) -> CheckResponse {
        CheckResponse {
            new_coil,
            row: None,
            column: None,
            layer: None,
            id: None,
        }
    }

    #[tokio::test]
    async fn test_poll_returns_pending_coil() {
        let mut with_slot = response(true);
        with_slot.row = Some(1);
        with_slot.column = Some(1);
        with_slot.layer = Some(1);

        let logger = Arc::new(MemoryLogger::new());
        let source = RemoteCoilSource::new(ScriptedFeed::new(vec![Ok(with_slot)]), logger.clone());

        let pending = source.poll().await.expect("new coil");
        assert_eq!(pending.slot, Some(SlotCoord { row: 1, column: 1, layer: 1 }));
        assert_eq!(logger.count(LogLevel::Error), 0);
    }

    #[tokio::test]
    async fn test_poll_false_flag_is_none() {
        let logger = Arc::new(MemoryLogger::new());
        let feed = ScriptedFeed::new(vec![Ok(response(false))]);
        let source = RemoteCoilSource::new(feed, logger.clone());

        assert_eq!(source.poll().await, None);
        assert!(logger.records().is_empty());
    }

    #[tokio::test]
    async fn test_poll_swallows_and_logs_failures() {
        let logger = Arc::new(MemoryLogger::new());
        let feed = ScriptedFeed::new(vec![
            Err(SourceError::Status(503)),
            Err(SourceError::Json("expected value".to_string())),
            Err(SourceError::Http("connection refused".to_string())),
        ]);
        let source = RemoteCoilSource::new(feed, logger.clone());

        for _ in 0..3 {
            assert_eq!(source.poll().await, None);
        }
        assert_eq!(logger.count(LogLevel::Error), 3);
        assert!(logger.contains(LogLevel::Error, "HTTP 503"));
    }

    #[tokio::test]
    async fn test_poll_malformed_notice_is_none() {
        let mut partial = response(true);
        partial.row = Some(2);

        let logger = Arc::new(MemoryLogger::new());
        let source = RemoteCoilSource::new(ScriptedFeed::new(vec![Ok(partial)]), logger.clone());

        assert_eq!(source.poll().await, None);
        assert!(logger.contains(LogLevel::Error, "Malformed"));
    }

    #[tokio::test]
    async fn test_offline_short_circuits_without_request() {
        let logger = Arc::new(MemoryLogger::new());
        let connectivity = SharedConnectivity::new(false);
        let source = RemoteCoilSource::with_connectivity(
            ScriptedFeed::new(vec![Ok(response(true))]),
            Arc::new(connectivity.clone()),
            logger.clone(),
        );

        assert_eq!(source.poll().await, None);
        assert_eq!(source.feed.calls.load(Ordering::SeqCst), 0);
        assert!(logger.contains(LogLevel::Warn, "Offline"));

        connectivity.set_online(true);
        assert!(source.poll().await.is_some());
        assert_eq!(source.feed.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_check_surfaces_errors() {
        let source = RemoteCoilSource::new(
            ScriptedFeed::new(vec![Err(SourceError::Status(404))]),
            Arc::new(crate::log::NoOpLogger),
        );
        assert!(matches!(source.check().await, Err(SourceError::Status(404))));
    }
}
