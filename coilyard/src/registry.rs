//! In-memory registry of placed coils.
//!
//! Insertion order is arrival order. Ids are handed out as
//! `placements + 1`, where `placements` counts every coil committed this
//! session; picking a coil up removes its entry but does not rewind that
//! counter, so an auto-assigned id is never handed out twice. Ids supplied
//! by the arrival feed are stored as given and are not tracked: a later
//! auto-assigned id may equal one of them.

use serde::Serialize;
use thiserror::Error;

use crate::layout::{explicit_position, sequential_position, BlockLayout, SlotCoord, WorldPosition};

/// Coil identifier, unique within a session except for the feed-id case
/// described in the module docs.
pub type CoilId = u32;

/// How a coil's slot was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Next free slot; holds the number of coils placed before this one.
    Sequential { sequence_index: usize },
    /// Operator- or feed-chosen slot.
    Explicit { slot: SlotCoord },
}

/// A placed coil.
///
/// The world position is not stored: it is derived from the placement and
/// the yard layout whenever it is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coil {
    pub id: CoilId,
    pub placement: Placement,
}

impl Coil {
    pub fn sequential(id: CoilId, sequence_index: usize) -> Self {
        Self {
            id,
            placement: Placement::Sequential { sequence_index },
        }
    }

    pub fn explicit(id: CoilId, slot: SlotCoord) -> Self {
        Self {
            id,
            placement: Placement::Explicit { slot },
        }
    }

    /// The explicit slot address, if this coil was placed by address.
    pub fn slot(&self) -> Option<SlotCoord> {
        match self.placement {
            Placement::Explicit { slot } => Some(slot),
            Placement::Sequential { .. } => None,
        }
    }

    /// World position under `layout`.
    pub fn position(&self, layout: &BlockLayout) -> WorldPosition {
        match self.placement {
            Placement::Sequential { sequence_index } => sequential_position(sequence_index, layout),
            Placement::Explicit { slot } => explicit_position(slot, layout),
        }
    }
}

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No coil at index {index} (registry holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Auto-assigned coil ids are exhausted")]
    IdsExhausted,
}

/// Ordered collection of the coils placed this session.
#[derive(Debug, Clone, Default)]
pub struct CoilRegistry {
    coils: Vec<Coil>,
    placements: usize,
}

impl CoilRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coils committed this session, including any picked up since.
    ///
    /// This is the sequence index of the next sequential placement.
    #[inline]
    pub fn count(&self) -> usize {
        self.placements
    }

    /// Coils currently stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.coils.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coils.is_empty()
    }

    /// Id the next auto-identified coil will get. Does not reserve it.
    #[inline]
    pub fn next_id(&self) -> Result<CoilId, RegistryError> {
        CoilId::try_from(self.placements)
            .ok()
            .and_then(|placed| placed.checked_add(1))
            .ok_or(RegistryError::IdsExhausted)
    }

    /// Appends a coil and returns the stored entry.
    pub fn add(&mut self, coil: Coil) -> &Coil {
        self.placements += 1;
        self.coils.push(coil);
        &self.coils[self.coils.len() - 1]
    }

    /// First coil with `id`, scanning in arrival order.
    pub fn find_by_id(&self, id: CoilId) -> Option<&Coil> {
        self.coils.iter().find(|c| c.id == id)
    }

    /// Arrival-order index of the first coil with `id`.
    pub fn position_of(&self, id: CoilId) -> Option<usize> {
        self.coils.iter().position(|c| c.id == id)
    }

    /// Removes exactly the entry at `index`. Later entries shift down by
    /// one; no id changes.
    pub fn remove_at(&mut self, index: usize) -> Result<Coil, RegistryError> {
        if index >= self.coils.len() {
            return Err(RegistryError::IndexOutOfRange {
                index,
                len: self.coils.len(),
            });
        }
        Ok(self.coils.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coil> {
        self.coils.iter()
    }
}
