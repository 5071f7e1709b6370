//! Events published to the rendering layer.

use serde::Serialize;

use crate::layout::WorldPosition;
use crate::registry::{Coil, CoilId};

/// A coil was committed to a slot; animate a proxy to `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlacementEvent {
    pub id: CoilId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<u32>,
    pub position: WorldPosition,
}

impl PlacementEvent {
    pub(crate) fn new(coil: &Coil, position: WorldPosition) -> Self {
        let slot = coil.slot();
        Self {
            id: coil.id,
            row: slot.map(|s| s.row),
            column: slot.map(|s| s.column),
            layer: slot.map(|s| s.layer),
            position,
        }
    }
}

/// A coil left the registry and is in transit from `position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickupEvent {
    pub id: CoilId,
    /// Registry index the coil was taken from.
    pub index: usize,
    /// Last known position of the coil.
    pub position: WorldPosition,
}

/// Everything the controller publishes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum YardEvent {
    Placed(PlacementEvent),
    PickedUp(PickupEvent),
}
