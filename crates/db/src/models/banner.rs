//! Banner models and DTOs.
//!
//! A banner is a promotional creative manageable independently of where it
//! is shown; the placement engine only references banner ids.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A row from the `banners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Banner {
    pub id: DbId,
    /// Internal reference name, not shown on the storefront.
    pub title: String,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_new_tab: bool,
    pub image_desktop: String,
    pub image_mobile: Option<String>,
    pub background_color: Option<String>,
    pub alt_text: Option<String>,
    /// Global flag, independent of any placement's own `is_active`.
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new banner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBanner {
    pub title: String,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_new_tab: Option<bool>,
    pub image_desktop: String,
    pub image_mobile: Option<String>,
    pub background_color: Option<String>,
    pub alt_text: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for partially updating a banner.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBanner {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub subheadline: Option<String>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_new_tab: Option<bool>,
    pub image_desktop: Option<String>,
    pub image_mobile: Option<String>,
    pub background_color: Option<String>,
    pub alt_text: Option<String>,
    pub is_active: Option<bool>,
}

/// Query parameters for the banner list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerListParams {
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
