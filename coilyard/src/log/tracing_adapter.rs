//! Adapter from [`Logger`] to the `tracing` crate.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Forwards records to `tracing` under the `coilyard` target.
///
/// Output depends on the subscriber installed by
/// [`crate::logging::init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: "coilyard", "{}", args),
            LogLevel::Debug => tracing::debug!(target: "coilyard", "{}", args),
            LogLevel::Info => tracing::info!(target: "coilyard", "{}", args),
            LogLevel::Warn => tracing::warn!(target: "coilyard", "{}", args),
            LogLevel::Error => tracing::error!(target: "coilyard", "{}", args),
        }
    }
}
