//! Operator session wiring.
//!
//! A [`YardSession`] owns the placement controller and the notification
//! reconciler for one yard view. Operator actions (buttons, search box,
//! prompt answers) and poll results both go through it, so there is a
//! single owner of yard state.
//!
//! The poll task and the operator share a session through
//! [`SharedSession`]. The lock is only held for synchronous work, never
//! across an await.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::layout::{BlockLayout, LayoutError, WorldPosition};
use crate::log::Logger;
use crate::operator;
use crate::placement::{PickupEvent, PlacementController, PlacementError, PlacementEvent, YardEvent};
use crate::reconciler::{NotificationReconciler, OfferOutcome, PromptSurface, ReconcilerState};
use crate::registry::{Coil, CoilId, CoilRegistry};
use crate::source::PendingCoil;
use crate::log_info;

/// Session shared between the operator and the poll task.
pub type SharedSession = Arc<Mutex<YardSession>>;

/// Result of an operator search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchOutcome {
    Found { coil: Coil, position: WorldPosition },
    NotFound(CoilId),
}

/// One yard view: placement state plus the arrival prompt.
pub struct YardSession {
    controller: PlacementController,
    reconciler: NotificationReconciler,
    logger: Arc<dyn Logger>,
}

impl YardSession {
    pub fn new(
        layout: BlockLayout,
        surface: Box<dyn PromptSurface>,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            controller: PlacementController::new(layout, Arc::clone(&logger))?,
            reconciler: NotificationReconciler::new(surface, Arc::clone(&logger)),
            logger,
        })
    }

    /// Wraps the session for sharing with a poll task.
    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn mark_model_loaded(&mut self) {
        self.controller.mark_model_loaded();
    }

    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    pub fn registry(&self) -> &CoilRegistry {
        self.controller.registry()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<YardEvent> {
        self.controller.subscribe()
    }

    /// "Add coil" button.
    pub fn place_next(&mut self) -> Result<PlacementEvent, PlacementError> {
        self.controller.place_next()
    }

    /// "Place at" form: the three fields as typed by the operator.
    pub fn place_at(
        &mut self,
        row: &str,
        column: &str,
        layer: &str,
    ) -> Result<PlacementEvent, PlacementError> {
        let slot = operator::parse_slot(row, column, layer)?;
        self.controller.place_at_slot(slot, None)
    }

    /// Search box.
    pub fn search(&self, input: &str) -> Result<SearchOutcome, PlacementError> {
        let id = operator::parse_coil_id(input)?;
        let outcome = match self.controller.find(id) {
            Some(coil) => SearchOutcome::Found {
                coil: *coil,
                position: coil.position(self.controller.layout()),
            },
            None => {
                log_info!(self.logger, "Coil with ID {} not found", id);
                SearchOutcome::NotFound(id)
            }
        };
        Ok(outcome)
    }

    pub fn pick_up(&mut self, index: usize) -> Result<PickupEvent, PlacementError> {
        self.controller.pick_up(index)
    }

    /// "Pick up" form: the coil id as typed by the operator.
    pub fn pick_up_coil(&mut self, input: &str) -> Result<PickupEvent, PlacementError> {
        let id = operator::parse_coil_id(input)?;
        self.controller.pick_up_coil(id)
    }

    /// Hands one poll result to the reconciler.
    pub fn offer_notification(&mut self, polled: Option<PendingCoil>) -> OfferOutcome {
        self.reconciler.offer(polled)
    }

    /// Operator accepted the open prompt.
    pub fn accept(&mut self) -> Result<Option<PlacementEvent>, PlacementError> {
        self.reconciler.accept(&mut self.controller)
    }

    /// Operator rejected the open prompt.
    pub fn reject(&mut self) -> Option<PendingCoil> {
        self.reconciler.reject()
    }

    pub fn notification_pending(&self) -> bool {
        self.reconciler.is_pending()
    }

    pub fn reconciler_state(&self) -> ReconcilerState {
        self.reconciler.state()
    }
}
