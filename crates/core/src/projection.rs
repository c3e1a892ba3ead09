//! Client-side projection of a space's placement list.
//!
//! Drag interactions need to feel instant, so a consumer applies the new
//! order locally before the server confirms it. The projection keeps the
//! last server-confirmed snapshot around: on success the pending order is
//! promoted (usually a no-op, the lists already match); on failure the
//! snapshot is restored so the UI never keeps showing an order the server
//! never persisted.

use crate::ordering::{self, PlacementError};
use crate::status::PlacementStatus;
use crate::types::{DbId, Timestamp};

/// One entry of the projected, status-annotated placement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedPlacement {
    pub banner_id: DbId,
    pub position: i32,
    pub status: PlacementStatus,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// Optimistic cache of one space's ordered placement list.
#[derive(Debug, Clone, Default)]
pub struct SpaceProjection {
    confirmed: Vec<ProjectedPlacement>,
    pending: Option<Vec<ProjectedPlacement>>,
}

impl SpaceProjection {
    /// Start from a server-confirmed list (ordered by position).
    pub fn new(confirmed: Vec<ProjectedPlacement>) -> Self {
        Self {
            confirmed,
            pending: None,
        }
    }

    /// The list the consumer should render right now: the optimistic order
    /// if a reorder is in flight, otherwise the confirmed one.
    pub fn current(&self) -> &[ProjectedPlacement] {
        self.pending.as_deref().unwrap_or(&self.confirmed)
    }

    /// Whether an unconfirmed local reorder is in flight.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The banner ids of the currently rendered order, ready to submit as a
    /// reorder payload.
    pub fn order(&self) -> Vec<DbId> {
        self.current().iter().map(|p| p.banner_id).collect()
    }

    /// Apply a local reorder before the server has confirmed it.
    ///
    /// Runs the same set-equality validation the server runs, so a payload
    /// the server would reject never renders locally either.
    pub fn apply_local_reorder(&mut self, banner_ids: &[DbId]) -> Result<(), PlacementError> {
        let current_ids = self.order();
        ordering::validate_reorder(&current_ids, banner_ids)?;

        let base = self.pending.take().unwrap_or_else(|| self.confirmed.clone());
        let mut reordered = Vec::with_capacity(base.len());
        for (idx, id) in banner_ids.iter().enumerate() {
            // validate_reorder guarantees every id is present exactly once.
            let mut entry = base
                .iter()
                .find(|p| p.banner_id == *id)
                .cloned()
                .ok_or_else(|| {
                    PlacementError::OrderMismatch(format!("banner {id} missing from projection"))
                })?;
            entry.position = idx as i32 + 1;
            reordered.push(entry);
        }
        self.pending = Some(reordered);
        Ok(())
    }

    /// Reconcile with the authoritative list after a successful mutation.
    pub fn confirm(&mut self, server_list: Vec<ProjectedPlacement>) {
        self.confirmed = server_list;
        self.pending = None;
    }

    /// Drop the optimistic order after a failed round-trip, restoring the
    /// last confirmed snapshot.
    pub fn rollback(&mut self) {
        self.pending = None;
    }
}
