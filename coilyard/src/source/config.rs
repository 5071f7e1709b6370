//! Configuration for the arrival feed and its poll loop.

use std::time::Duration;

/// Default base URL of the yard backend.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Path appended to the base URL for the arrival check.
pub const CHECK_FOR_NEW_COIL_PATH: &str = "checkForNewCoil";

/// Default time between polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default HTTP timeout for a single poll request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Settings for [`HttpCoilFeed`](super::HttpCoilFeed) and the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Whether polling starts with the session.
    pub enabled: bool,

    /// Backend base URL, without the endpoint path.
    pub api_url: String,

    /// How often to poll.
    pub poll_interval: Duration,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the arrival check endpoint.
    pub fn check_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            CHECK_FOR_NEW_COIL_PATH
        )
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}
