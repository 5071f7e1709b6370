//! Settings structs, one per `[section]` of config.ini.

use std::path::PathBuf;
use std::time::Duration;

use crate::layout::BlockLayout;
use crate::source::SourceConfig;

/// Complete configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// `[layout]`: slot grid geometry
    pub layout: BlockLayout,
    /// `[api]`: yard backend
    pub api: ApiSettings,
    /// `[polling]`: arrival poll loop
    pub polling: PollingSettings,
    /// `[logging]`
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// Backend base URL, without the endpoint path.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingSettings {
    pub enabled: bool,
    /// Seconds between arrival checks.
    pub interval: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Log file path; its parent directory is created on start.
    pub file: PathBuf,
}

impl ConfigFile {
    /// Arrival feed settings derived from `[api]` and `[polling]`.
    pub fn source_config(&self) -> SourceConfig {
        SourceConfig {
            enabled: self.polling.enabled,
            api_url: self.api.base_url.clone(),
            poll_interval: Duration::from_secs(self.polling.interval),
            timeout: Duration::from_secs(self.api.timeout),
        }
    }
}
