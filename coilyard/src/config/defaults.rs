//! Default values for settings not covered by the component modules.

use std::path::PathBuf;

use super::settings::*;
use crate::layout::BlockLayout;
use crate::logging::{default_log_dir, default_log_file};
use crate::source::{DEFAULT_API_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_POLL_INTERVAL_SECS};

pub const DEFAULT_POLLING_ENABLED: bool = true;

/// `~/.coilyard/logs/coilyard.log`
pub fn default_log_path() -> PathBuf {
    default_log_dir().join(default_log_file())
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            layout: BlockLayout::default(),
            api: ApiSettings::default(),
            polling: PollingSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_POLLING_ENABLED,
            interval: DEFAULT_POLL_INTERVAL_SECS,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: default_log_path(),
        }
    }
}
