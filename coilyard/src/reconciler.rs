//! Operator confirmation of server-announced coils.
//!
//! The reconciler is a two-state machine:
//!
//! ```text
//!            offer(Some(coil)) / present prompt
//!   Idle  ─────────────────────────────────────▶  AwaitingResponse
//!    ▲                                               │
//!    └──────────── accept (commit) / reject ─────────┘
//! ```
//!
//! While a prompt is open, further arrivals are dropped rather than queued,
//! so the operator never sees two prompts at once. The backend keeps
//! announcing a coil until it is stored, so a dropped arrival comes back on
//! a later poll.
//!
//! If the prompt cannot be shown, the arrival is dropped and the reconciler
//! stays `Idle`. Nothing is ever committed without an explicit accept.

use std::sync::Arc;

use thiserror::Error;

use crate::log::Logger;
use crate::placement::{PlacementController, PlacementError, PlacementEvent};
use crate::source::PendingCoil;
use crate::{log_debug, log_error, log_info, log_warn};

/// The prompt could not be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresentationError {
    #[error("Prompt surface unavailable: {0}")]
    Unavailable(String),
}

/// Where pending coils are shown to the operator.
///
/// `present` must return promptly; the operator's answer comes back later
/// through [`NotificationReconciler::accept`] or
/// [`NotificationReconciler::reject`].
pub trait PromptSurface: Send {
    /// Show the accept/reject prompt for `coil`.
    fn present(&mut self, coil: &PendingCoil) -> Result<(), PresentationError>;

    /// Hide the prompt once it has been answered.
    fn dismiss(&mut self) {}
}

/// Observable reconciler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilerState {
    Idle,
    AwaitingResponse(PendingCoil),
}

/// Result of handing a poll result to the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferOutcome {
    /// The poll found nothing.
    NothingNew,
    /// A prompt is now open for this coil.
    Prompted,
    /// A prompt was already open; the arrival was dropped.
    AlreadyPending,
    /// The prompt could not be shown; the arrival was dropped.
    PresentationFailed,
}

/// Single-flight gate between the arrival feed and placement.
pub struct NotificationReconciler {
    state: ReconcilerState,
    surface: Box<dyn PromptSurface>,
    logger: Arc<dyn Logger>,
}

impl NotificationReconciler {
    pub fn new(surface: Box<dyn PromptSurface>, logger: Arc<dyn Logger>) -> Self {
        Self {
            state: ReconcilerState::Idle,
            surface,
            logger,
        }
    }

    pub fn state(&self) -> ReconcilerState {
        self.state
    }

    /// True while a prompt is waiting for the operator.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, ReconcilerState::AwaitingResponse(_))
    }

    /// The coil currently awaiting a decision.
    pub fn pending(&self) -> Option<PendingCoil> {
        match self.state {
            ReconcilerState::AwaitingResponse(coil) => Some(coil),
            ReconcilerState::Idle => None,
        }
    }

    /// Feeds one poll result into the state machine.
    pub fn offer(&mut self, polled: Option<PendingCoil>) -> OfferOutcome {
        let Some(coil) = polled else {
            return OfferOutcome::NothingNew;
        };

        if self.is_pending() {
            log_debug!(
                self.logger,
                "New coil reported while a prompt is open; dropping {:?}",
                coil
            );
            return OfferOutcome::AlreadyPending;
        }

        match self.surface.present(&coil) {
            Ok(()) => {
                self.state = ReconcilerState::AwaitingResponse(coil);
                log_info!(self.logger, "Prompting operator for new coil {:?}", coil);
                OfferOutcome::Prompted
            }
            Err(e) => {
                log_error!(self.logger, "Could not show new coil prompt: {}", e);
                self.state = ReconcilerState::Idle;
                OfferOutcome::PresentationFailed
            }
        }
    }

    /// Operator accepted: commit the pending coil and return to `Idle`.
    ///
    /// A server-chosen slot is placed by address, otherwise the coil goes
    /// to the next free slot. `Ok(None)` when no prompt was open.
    pub fn accept(
        &mut self,
        controller: &mut PlacementController,
    ) -> Result<Option<PlacementEvent>, PlacementError> {
        let Some(coil) = self.take_pending() else {
            log_debug!(self.logger, "Accept with no open prompt ignored");
            return Ok(None);
        };
        log_info!(self.logger, "User accepted new coil request");

        let committed = match coil.slot {
            Some(slot) => controller.place_at_slot(slot, coil.id),
            None => controller.place_next_with_id(coil.id),
        };

        match committed {
            Ok(event) => Ok(Some(event)),
            Err(e) => {
                log_warn!(self.logger, "Accepted coil could not be placed: {}", e);
                Err(e)
            }
        }
    }

    /// Operator rejected: discard the pending coil and return to `Idle`.
    pub fn reject(&mut self) -> Option<PendingCoil> {
        let coil = self.take_pending();
        if coil.is_some() {
            log_info!(self.logger, "User rejected new coil request");
        } else {
            log_debug!(self.logger, "Reject with no open prompt ignored");
        }
        coil
    }

    fn take_pending(&mut self) -> Option<PendingCoil> {
        let coil = self.pending()?;
        self.state = ReconcilerState::Idle;
        self.surface.dismiss();
        Some(coil)
    }
}
