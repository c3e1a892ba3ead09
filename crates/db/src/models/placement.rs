//! Placement models and DTOs.
//!
//! A placement is the join entity between a space and a banner: it carries
//! the 1-based rank within the space, an optional visibility window, and
//! the unwindowed active flag. It is a first-class entity with its own
//! identity and lifecycle, not a side attribute bag.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::status::PlacementStatus;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `placements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Placement {
    pub id: DbId,
    pub space_id: DbId,
    pub banner_id: DbId,
    /// 1-based rank within the space; always dense after any mutation.
    pub position: i32,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    /// Only meaningful while no window is set; a window supersedes it.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A placement joined with the banner summary the admin console lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlacementEntry {
    pub id: DbId,
    pub banner_id: DbId,
    pub title: String,
    pub image_desktop: String,
    pub position: i32,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: bool,
}

/// A placement entry annotated with its derived display status.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedPlacement {
    #[serde(flatten)]
    pub entry: PlacementEntry,
    pub status: PlacementStatus,
}

impl PlacementEntry {
    /// Annotate this entry with its display status at `now`.
    pub fn annotate(self, now: Timestamp) -> AnnotatedPlacement {
        let status = vitrine_core::status::derive(self.starts_at, self.ends_at, self.is_active, now);
        AnnotatedPlacement {
            entry: self,
            status,
        }
    }
}

/// A storefront row before status annotation: full banner content plus the
/// window fields needed to derive visibility.
#[derive(Debug, Clone, FromRow)]
pub struct StorefrontRow {
    pub banner_id: DbId,
    pub position: i32,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_new_tab: bool,
    pub image_desktop: String,
    pub image_mobile: Option<String>,
    pub background_color: Option<String>,
    pub alt_text: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: bool,
}

/// A storefront entry: banner content plus derived display status.
#[derive(Debug, Clone, Serialize)]
pub struct StorefrontPlacement {
    pub banner_id: DbId,
    pub position: i32,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_new_tab: bool,
    pub image_desktop: String,
    pub image_mobile: Option<String>,
    pub background_color: Option<String>,
    pub alt_text: Option<String>,
    pub status: PlacementStatus,
}

impl StorefrontRow {
    /// Annotate this row with its display status at `now`.
    pub fn annotate(self, now: Timestamp) -> StorefrontPlacement {
        let status = vitrine_core::status::derive(self.starts_at, self.ends_at, self.is_active, now);
        StorefrontPlacement {
            banner_id: self.banner_id,
            position: self.position,
            headline: self.headline,
            subheadline: self.subheadline,
            cta_text: self.cta_text,
            cta_url: self.cta_url,
            cta_new_tab: self.cta_new_tab,
            image_desktop: self.image_desktop,
            image_mobile: self.image_mobile,
            background_color: self.background_color,
            alt_text: self.alt_text,
            status,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for attaching a banner to a space.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachRequest {
    pub banner_id: DbId,
}

/// DTO for detaching several banners from a space at once.
#[derive(Debug, Clone, Deserialize)]
pub struct DetachManyRequest {
    pub banner_ids: Vec<DbId>,
}

/// DTO for submitting the complete desired order of a space.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub banner_ids: Vec<DbId>,
    /// The `placements_version` the client based its order on. When present,
    /// a mismatch is rejected with a retryable conflict.
    pub version: Option<i64>,
}

/// DTO for setting or clearing a placement's visibility window.
///
/// Both bounds absent clears the window and reverts the placement to
/// `is_active`-driven status.
#[derive(Debug, Clone, Deserialize)]
pub struct SetWindowRequest {
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
}

/// DTO for toggling the unwindowed active flag.
#[derive(Debug, Clone, Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

/// DTO for moving a placement into another space.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRequest {
    pub to_space_key: String,
    /// 1-based insertion index in the destination; absent means append.
    pub index: Option<i32>,
}
