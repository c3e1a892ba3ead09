//! Placement display status derivation.
//!
//! Status is computed on read by comparing the stored window against the
//! caller's clock; there is no background scheduler flipping rows over.

use serde::Serialize;

use crate::types::Timestamp;

/// Display status of a placement at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementStatus {
    /// No window, `is_active = false`.
    Hidden,
    /// No window, `is_active = true`.
    AlwaysVisible,
    /// Window set, `now` before `starts_at`.
    Scheduled,
    /// Window set, `now` inside it (boundaries inclusive).
    Live,
    /// Window set, `now` after `ends_at`.
    Expired,
}

impl PlacementStatus {
    /// Whether the storefront should render this placement.
    pub fn is_visible(self) -> bool {
        matches!(self, Self::AlwaysVisible | Self::Live)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::AlwaysVisible => "always_visible",
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Expired => "expired",
        }
    }
}

/// Derive the display status of a placement at `now`.
///
/// A windowed placement is governed solely by its window; `is_active` only
/// applies when no window is set. The window setter writes
/// `is_active = true` alongside a window, so the flag never contradicts it.
/// Boundary instants belong to [`PlacementStatus::Live`]: the comparisons
/// are strict `<` / `>`.
pub fn derive(
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
    is_active: bool,
    now: Timestamp,
) -> PlacementStatus {
    if starts_at.is_some() || ends_at.is_some() {
        if let Some(start) = starts_at {
            if now < start {
                return PlacementStatus::Scheduled;
            }
        }
        if let Some(end) = ends_at {
            if now > end {
                return PlacementStatus::Expired;
            }
        }
        return PlacementStatus::Live;
    }

    if is_active {
        PlacementStatus::AlwaysVisible
    } else {
        PlacementStatus::Hidden
    }
}
