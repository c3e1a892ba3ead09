//! Validation half of the placement ordering protocol.
//!
//! The repository layer performs the actual rank rewrites inside a single
//! transaction; the set/window/capacity checks that must pass before any
//! write happens live here so client tooling (see [`crate::projection`])
//! can run the same validation locally.

use std::collections::HashSet;

use crate::types::{DbId, Timestamp};

/// Placement engine error taxonomy.
///
/// Every rejected mutation fails with one of these before any write, so the
/// caller always knows exactly what to roll back and why. `Conflict` is the
/// only recoverable variant: the client refetches and replays its intent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("Space not found: {key}")]
    SpaceNotFound { key: String },

    #[error("Banner not found: {id}")]
    BannerNotFound { id: DbId },

    #[error("Banner {banner_id} is not placed in space {space_key}")]
    NotPlaced { space_key: String, banner_id: DbId },

    #[error("Banner {banner_id} is already placed in space {space_key}")]
    AlreadyAttached { space_key: String, banner_id: DbId },

    #[error("Space is full ({current}/{max})")]
    CapacityExceeded { current: i64, max: i64 },

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Order mismatch: {0}")]
    OrderMismatch(String),

    #[error("Stale placement version: expected {expected}, found {actual}")]
    Conflict { expected: i64, actual: i64 },
}

/// Check that attaching `additional` more placements stays within `max`.
pub fn check_capacity(current: i64, max: i64, additional: i64) -> Result<(), PlacementError> {
    if current + additional > max {
        return Err(PlacementError::CapacityExceeded { current, max });
    }
    Ok(())
}

/// Validate an optional time window.
///
/// Rules:
/// - both bounds present: `starts_at < ends_at` (strict; an empty window is
///   invalid)
/// - `ends_at` without `starts_at` is invalid (an upper bound needs an
///   anchor)
/// - a lone `starts_at`, or no bounds at all, is fine
pub fn validate_window(
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
) -> Result<(), PlacementError> {
    match (starts_at, ends_at) {
        (Some(start), Some(end)) if start >= end => Err(PlacementError::InvalidWindow(format!(
            "starts_at ({start}) must be strictly before ends_at ({end})"
        ))),
        (None, Some(_)) => Err(PlacementError::InvalidWindow(
            "ends_at requires starts_at to be set".into(),
        )),
        _ => Ok(()),
    }
}

/// Validate that `proposed` is a permutation of `current`.
///
/// A reorder must carry the complete placement set of the space: no implicit
/// attach or detach is allowed through the reorder path.
pub fn validate_reorder(current: &[DbId], proposed: &[DbId]) -> Result<(), PlacementError> {
    if proposed.len() != current.len() {
        return Err(PlacementError::OrderMismatch(format!(
            "expected {} banner ids, got {}",
            current.len(),
            proposed.len()
        )));
    }

    let current_set: HashSet<DbId> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(proposed.len());
    for id in proposed {
        if !current_set.contains(id) {
            return Err(PlacementError::OrderMismatch(format!(
                "banner {id} is not placed in this space"
            )));
        }
        if !seen.insert(*id) {
            return Err(PlacementError::OrderMismatch(format!(
                "banner {id} appears more than once"
            )));
        }
    }
    Ok(())
}

/// Clamp a requested 1-based insertion index into `1..=len + 1`.
///
/// `None` means "append".
pub fn clamp_insert_index(index: Option<i32>, len: i64) -> i32 {
    let append = len as i32 + 1;
    match index {
        Some(i) if i < 1 => 1,
        Some(i) if i > append => append,
        Some(i) => i,
        None => append,
    }
}
