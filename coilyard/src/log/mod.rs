//! Observability sink for the yard components.
//!
//! The placement, polling and notification components report faults through
//! the [`Logger`] trait instead of talking to `tracing` directly, so a host
//! can route or silence them and tests can inspect them.
//!
//! - [`TracingLogger`]: forwards to the `tracing` crate (production)
//! - [`NoOpLogger`]: discards everything
//! - [`MemoryLogger`]: keeps every record in memory for assertions
//!
//! ```
//! use coilyard::log::{Logger, NoOpLogger};
//! use coilyard::{log_info, log_warn};
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_info!(logger, "Coil #{} committed", 7);
//! log_warn!(logger, "Poll endpoint returned {}", 503);
//! ```

mod memory;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use memory::{LogRecord, MemoryLogger};
pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
