//! Coilyard - slot addressing and placement for a warehouse coil yard
//!
//! Coils are stored in a grid of blocks. Each block is a small 3D lattice
//! of slots; blocks are laid out in rows across the yard floor. This crate
//! maps slots to world positions, keeps the registry of placed coils and
//! runs the loop that asks the yard backend for new arrivals.
//!
//! ```text
//!  CoilPoller ──▶ RemoteCoilSource ──▶ backend /checkForNewCoil
//!      │
//!      ▼
//!  YardSession ─┬─▶ NotificationReconciler ──▶ PromptSurface (operator)
//!               └─▶ PlacementController ──▶ CoilRegistry
//!                          │                    │
//!                          │            layout (slot → world position)
//!                          ▼
//!                  broadcast<YardEvent> ──▶ rendering
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use coilyard::layout::{sequential_position, BlockLayout};
//! use coilyard::log::NoOpLogger;
//! use coilyard::placement::PlacementController;
//!
//! let layout = BlockLayout::default();
//! let first = sequential_position(0, &layout);
//! assert_eq!((first.x, first.z), (-7.2, -13.0));
//!
//! let mut controller = PlacementController::new(layout, Arc::new(NoOpLogger)).unwrap();
//! controller.mark_model_loaded();
//! let event = controller.place_next().unwrap();
//! assert_eq!(event.id, 1);
//! ```

pub mod config;
pub mod layout;
pub mod log;
pub mod logging;
pub mod operator;
pub mod placement;
pub mod poller;
pub mod reconciler;
pub mod registry;
pub mod session;
pub mod source;

/// Version of the coilyard library and CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
