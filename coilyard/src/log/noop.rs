//! Logger that drops every record.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Discards all messages. Handy for tests that don't care about output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
