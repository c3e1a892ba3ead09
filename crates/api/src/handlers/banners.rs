//! Handlers for the banner catalog.
//!
//! Banners are managed independently of where they are shown; the placement
//! engine only ever references their ids. Deleting a placed banner cascades
//! to its placements and compacts the affected spaces.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::ordering::PlacementError;
use vitrine_core::types::DbId;
use vitrine_db::models::banner::{BannerListParams, CreateBanner, UpdateBanner};
use vitrine_db::repositories::BannerRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/banners
///
/// List banners, newest first. Supports `?include_inactive=`, `?limit=`,
/// `?offset=`.
pub async fn list_banners(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BannerListParams>,
) -> AppResult<impl IntoResponse> {
    let banners = BannerRepo::list(&state.pool, &params).await?;

    Ok(Json(DataResponse { data: banners }))
}

/// GET /api/v1/banners/{id}
pub async fn get_banner(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(banner_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let banner = BannerRepo::find_by_id(&state.pool, banner_id)
        .await?
        .ok_or(AppError::Placement(PlacementError::BannerNotFound {
            id: banner_id,
        }))?;

    Ok(Json(DataResponse { data: banner }))
}

/// POST /api/v1/banners
///
/// Create a banner. Editor or admin.
pub async fn create_banner(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Json(input): Json<CreateBanner>,
) -> AppResult<impl IntoResponse> {
    if input.title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".into()));
    }
    if input.image_desktop.trim().is_empty() {
        return Err(AppError::BadRequest(
            "image_desktop must not be empty".into(),
        ));
    }

    let banner = BannerRepo::create(&state.pool, &input).await?;

    tracing::info!(banner_id = banner.id, user_id = editor.user_id, "Banner created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: banner })))
}

/// PUT /api/v1/banners/{id}
///
/// Partially update a banner. Editor or admin.
pub async fn update_banner(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(banner_id): Path<DbId>,
    Json(input): Json<UpdateBanner>,
) -> AppResult<impl IntoResponse> {
    let banner = BannerRepo::update(&state.pool, banner_id, &input)
        .await?
        .ok_or(AppError::Placement(PlacementError::BannerNotFound {
            id: banner_id,
        }))?;

    tracing::info!(banner_id, user_id = editor.user_id, "Banner updated");

    Ok(Json(DataResponse { data: banner }))
}

/// DELETE /api/v1/banners/{id}
///
/// Delete a banner, detaching it from every space it is placed in. Editor
/// or admin.
pub async fn delete_banner(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(banner_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BannerRepo::delete(&state.pool, banner_id).await?;

    if !deleted {
        return Err(AppError::Placement(PlacementError::BannerNotFound {
            id: banner_id,
        }));
    }

    tracing::info!(banner_id, user_id = editor.user_id, "Banner deleted");

    Ok(StatusCode::NO_CONTENT)
}
