//! CLI command implementations.
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`plan`] - Preview the sequential placement order
//! - [`slot`] - Resolve one slot to its world position
//! - [`watch`] - Interactive arrival session against the yard backend

pub mod config;
pub mod plan;
pub mod slot;
pub mod watch;
