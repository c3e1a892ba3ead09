//! Handlers for the space directory.
//!
//! Spaces are the named display slots banners get placed into. Listing and
//! reading is open to any authenticated user; configuration is admin-only
//! because downstream renderers depend on layout/capacity staying sane.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vitrine_core::space::{self, LayoutKind};
use vitrine_db::models::placement::AnnotatedPlacement;
use vitrine_db::models::space::{CreateSpace, Space, UpdateSpace};
use vitrine_db::repositories::{PlacementRepo, SpaceRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::space_by_key;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// A space enriched with its ordered, status-annotated placement list.
#[derive(Debug, Serialize)]
pub struct SpaceDetail {
    #[serde(flatten)]
    pub space: Space,
    pub placements: Vec<AnnotatedPlacement>,
}

/// GET /api/v1/spaces
///
/// List all spaces with their constraints, grouped by page.
pub async fn list_spaces(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let spaces = SpaceRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: spaces }))
}

/// GET /api/v1/spaces/{key}
///
/// Get a space with its placements in rank order, each annotated with the
/// status derived at the server's current time.
pub async fn get_space(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let entries = PlacementRepo::list_for_space(&state.pool, space.id).await?;

    let now = chrono::Utc::now();
    let placements = entries.into_iter().map(|e| e.annotate(now)).collect();

    Ok(Json(DataResponse {
        data: SpaceDetail { space, placements },
    }))
}

/// POST /api/v1/spaces
///
/// Create a space. Admin only.
pub async fn create_space(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSpace>,
) -> AppResult<impl IntoResponse> {
    let layout: LayoutKind = input.layout_kind.parse()?;
    space::validate_capacity(layout, input.max_items)?;

    let space = SpaceRepo::create(&state.pool, &input).await?;

    tracing::info!(key = %space.key, user_id = admin.user_id, "Space created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: space })))
}

/// PUT /api/v1/spaces/{key}
///
/// Update a space's configuration. The key is immutable. Admin only.
///
/// The layout/capacity invariant is validated against the merged result,
/// so changing a grid space to `single` without also dropping `max_items`
/// to 1 is rejected.
pub async fn update_space(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateSpace>,
) -> AppResult<impl IntoResponse> {
    let current = space_by_key(&state.pool, &key).await?;

    let layout_str = input.layout_kind.as_deref().unwrap_or(&current.layout_kind);
    let layout: LayoutKind = layout_str.parse()?;
    let max_items = input.max_items.unwrap_or(current.max_items);
    space::validate_capacity(layout, max_items)?;

    let space = SpaceRepo::update(&state.pool, current.id, &input)
        .await?
        .ok_or(AppError::Placement(
            vitrine_core::ordering::PlacementError::SpaceNotFound { key },
        ))?;

    tracing::info!(key = %space.key, user_id = admin.user_id, "Space updated");

    Ok(Json(DataResponse { data: space }))
}

/// DELETE /api/v1/spaces/{key}
///
/// Delete a space and all its placements. Admin only.
pub async fn delete_space(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    SpaceRepo::delete(&state.pool, space.id).await?;

    tracing::info!(key = %key, user_id = admin.user_id, "Space deleted");

    Ok(StatusCode::NO_CONTENT)
}
