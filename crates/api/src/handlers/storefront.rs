//! The storefront read path.
//!
//! Public (no auth): the storefront renderer asks for a space's visible
//! banners and gets them in rank order, already filtered to the statuses
//! that should render. Status is derived per request; there is no timer
//! flipping placements live or expired.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vitrine_core::types::Timestamp;
use vitrine_db::models::placement::StorefrontPlacement;
use vitrine_db::repositories::PlacementRepo;

use crate::error::AppResult;
use crate::handlers::space_by_key;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the storefront read.
#[derive(Debug, Deserialize)]
pub struct StorefrontParams {
    /// Evaluate visibility at this instant instead of now (preview).
    pub at: Option<Timestamp>,
}

/// GET /api/v1/storefront/spaces/{key}
///
/// The space's visible placements (live or always-visible) in rank order,
/// with full banner content.
pub async fn get_visible_placements(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<StorefrontParams>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let rows = PlacementRepo::storefront_rows(&state.pool, space.id).await?;

    let now = params.at.unwrap_or_else(chrono::Utc::now);
    let placements: Vec<StorefrontPlacement> = rows
        .into_iter()
        .map(|row| row.annotate(now))
        .filter(|p| p.status.is_visible())
        .collect();

    Ok(Json(DataResponse { data: placements }))
}
