//! Placement controller.
//!
//! Turns operator and feed requests into committed coils:
//!
//! - [`PlacementController::place_next`] fills the next free slot
//! - [`PlacementController::place_at`] fills an explicit row/column/layer
//! - [`PlacementController::pick_up`] takes a coil back out
//!
//! Each success is published as a [`YardEvent`] on a broadcast channel for
//! the rendering layer. Failures leave the registry untouched.

mod error;
mod event;

use std::sync::Arc;

use tokio::sync::broadcast;

pub use error::PlacementError;
pub use event::{PickupEvent, PlacementEvent, YardEvent};

use crate::layout::{BlockLayout, LayoutError, SlotCoord};
use crate::log::Logger;
use crate::operator;
use crate::registry::{Coil, CoilId, CoilRegistry};
use crate::{log_debug, log_info};

/// Buffered events per subscriber before it starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the session's registry and commits placements into it.
///
/// All mutating calls take `&mut self`, so a placement can't start while
/// another is still running.
pub struct PlacementController {
    registry: CoilRegistry,
    layout: BlockLayout,
    model_loaded: bool,
    events: broadcast::Sender<YardEvent>,
    logger: Arc<dyn Logger>,
}

impl PlacementController {
    /// New controller with an empty registry. Placements are refused until
    /// [`mark_model_loaded`](Self::mark_model_loaded) is called.
    ///
    /// Fails if `layout` does not pass [`BlockLayout::validate`].
    pub fn new(layout: BlockLayout, logger: Arc<dyn Logger>) -> Result<Self, LayoutError> {
        layout.validate()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            registry: CoilRegistry::new(),
            layout,
            model_loaded: false,
            events,
            logger,
        })
    }

    /// Signals that the coil model is available for new placements.
    pub fn mark_model_loaded(&mut self) {
        if !self.model_loaded {
            log_info!(self.logger, "Coil model template loaded");
        }
        self.model_loaded = true;
    }

    pub fn layout(&self) -> &BlockLayout {
        &self.layout
    }

    pub fn registry(&self) -> &CoilRegistry {
        &self.registry
    }

    /// Subscribe to placement and pick-up events.
    pub fn subscribe(&self) -> broadcast::Receiver<YardEvent> {
        self.events.subscribe()
    }

    /// Places a coil in the next free slot with the next auto id.
    pub fn place_next(&mut self) -> Result<PlacementEvent, PlacementError> {
        self.place_next_with_id(None)
    }

    /// Places a coil in the next free slot, keeping a feed-supplied id if
    /// there is one.
    pub fn place_next_with_id(
        &mut self,
        id: Option<CoilId>,
    ) -> Result<PlacementEvent, PlacementError> {
        self.ensure_loaded()?;

        let id = match id {
            Some(id) => id,
            None => self.registry.next_id()?,
        };
        let sequence_index = self.registry.count();
        let coil = *self.registry.add(Coil::sequential(id, sequence_index));
        let position = coil.position(&self.layout);

        log_info!(self.logger, "Coil #{} going to {}", id, position);
        Ok(self.publish_placed(&coil))
    }

    /// Places a coil at a 1-based row/column/layer.
    ///
    /// `id` comes from the arrival feed when present and is stored as-is;
    /// otherwise the next auto id is used.
    pub fn place_at(
        &mut self,
        row: i64,
        column: i64,
        layer: i64,
        id: Option<CoilId>,
    ) -> Result<PlacementEvent, PlacementError> {
        let slot = SlotCoord {
            row: operator::positive("row", row)?,
            column: operator::positive("column", column)?,
            layer: operator::positive("layer", layer)?,
        };
        self.place_at_slot(slot, id)
    }

    /// [`place_at`](Self::place_at) for an already validated slot.
    pub fn place_at_slot(
        &mut self,
        slot: SlotCoord,
        id: Option<CoilId>,
    ) -> Result<PlacementEvent, PlacementError> {
        self.ensure_loaded()?;

        let id = match id {
            Some(id) => id,
            None => self.registry.next_id()?,
        };
        let coil = *self.registry.add(Coil::explicit(id, slot));

        log_info!(self.logger, "Coil #{} placed at {}", id, slot);
        Ok(self.publish_placed(&coil))
    }

    /// Removes the coil at registry `index` and reports where it was.
    pub fn pick_up(&mut self, index: usize) -> Result<PickupEvent, PlacementError> {
        let coil = self.registry.remove_at(index)?;
        let event = PickupEvent {
            id: coil.id,
            index,
            position: coil.position(&self.layout),
        };

        log_info!(
            self.logger,
            "Coil #{} picked up from {}",
            event.id,
            event.position
        );
        self.publish(YardEvent::PickedUp(event));
        Ok(event)
    }

    /// Picks up the first stored coil with `id`.
    pub fn pick_up_coil(&mut self, id: CoilId) -> Result<PickupEvent, PlacementError> {
        let index = self
            .registry
            .position_of(id)
            .ok_or(PlacementError::NotFound(id))?;
        self.pick_up(index)
    }

    /// Looks up a coil by id.
    pub fn find(&self, id: CoilId) -> Option<&Coil> {
        self.registry.find_by_id(id)
    }

    fn ensure_loaded(&self) -> Result<(), PlacementError> {
        if self.model_loaded {
            Ok(())
        } else {
            Err(PlacementError::NotLoaded)
        }
    }

    fn publish_placed(&self, coil: &Coil) -> PlacementEvent {
        let event = PlacementEvent::new(coil, coil.position(&self.layout));
        self.publish(YardEvent::Placed(event));
        event
    }

    fn publish(&self, event: YardEvent) {
        // No subscribers is fine: nothing is rendering.
        if self.events.send(event).is_err() {
            log_debug!(self.logger, "No event subscribers for {:?}", event);
        }
    }
}
