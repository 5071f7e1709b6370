//! Placement errors reported back to the operator.

use thiserror::Error;

use crate::registry::{CoilId, RegistryError};

/// Why a placement, search or pick-up request was refused.
///
/// Every variant leaves the registry untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Operator-entered row, column, layer or id is not a positive integer.
    #[error("Invalid {field}: '{value}' (must be a positive integer)")]
    InvalidCoordinate { field: &'static str, value: String },

    /// The coil model has not finished loading; retry later.
    #[error("Coil model template is not loaded yet. Please wait.")]
    NotLoaded,

    /// Pick-up index with no coil behind it.
    #[error("Nothing to pick up at index {index} ({len} coils stored)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No stored coil carries this id.
    #[error("Coil with ID {0} not found")]
    NotFound(CoilId),

    /// Every auto id has been handed out this session.
    #[error("No more coil ids available this session")]
    IdsExhausted,
}

impl From<RegistryError> for PlacementError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::IndexOutOfRange { index, len } => {
                PlacementError::IndexOutOfRange { index, len }
            }
            RegistryError::IdsExhausted => PlacementError::IdsExhausted,
        }
    }
}
