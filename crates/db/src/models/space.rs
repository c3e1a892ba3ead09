//! Space models and DTOs.
//!
//! A space is a named display slot in the storefront (e.g. the home hero
//! slider). Spaces are configured by admins and read-only from the
//! placement engine's perspective.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `spaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Space {
    pub id: DbId,
    /// Stable human-readable key (e.g. `home_hero_slider`), distinct from `id`.
    pub key: String,
    pub name: String,
    /// Owning page identifier (e.g. `home`).
    pub page: String,
    /// One of `slider`, `grid`, `single`.
    pub layout_kind: String,
    pub max_items: i32,
    /// Bumped by every placement mutation in this space; reorder requests
    /// may send it back to detect stale bases.
    pub placements_version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new space.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpace {
    pub key: String,
    pub name: String,
    pub page: String,
    pub layout_kind: String,
    pub max_items: i32,
}

/// DTO for partially updating a space. The key is immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSpace {
    pub name: Option<String>,
    pub page: Option<String>,
    pub layout_kind: Option<String>,
    pub max_items: Option<i32>,
}
