//! Handlers for the placement engine: attach, detach, reorder, schedule,
//! and cross-space moves.
//!
//! All mutations are editor-gated and delegate their invariants (capacity,
//! set equality, window validity, dense ranks) to the repository layer,
//! which enforces them inside a single transaction per operation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use vitrine_core::types::DbId;
use vitrine_db::models::placement::{
    AnnotatedPlacement, AttachRequest, DetachManyRequest, MoveRequest, ReorderRequest,
    SetActiveRequest, SetWindowRequest,
};
use vitrine_db::repositories::PlacementRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::space_by_key;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

/// Ordered placement list plus the version a client should base its next
/// reorder on.
#[derive(Debug, Serialize)]
pub struct PlacementList {
    pub version: i64,
    pub placements: Vec<AnnotatedPlacement>,
}

/// Result payload for a bulk detach.
#[derive(Debug, Serialize)]
pub struct BulkDetachResult {
    pub removed: u64,
}

/// GET /api/v1/spaces/{key}/placements
///
/// The space's placement list in rank order, annotated with derived status,
/// plus the current placements version.
pub async fn list_placements(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let entries = PlacementRepo::list_for_space(&state.pool, space.id).await?;

    let now = chrono::Utc::now();
    let placements = entries.into_iter().map(|e| e.annotate(now)).collect();

    Ok(Json(DataResponse {
        data: PlacementList {
            version: space.placements_version,
            placements,
        },
    }))
}

/// POST /api/v1/spaces/{key}/placements
///
/// Attach a banner at the end of the space's order.
pub async fn attach(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<AttachRequest>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let placement = PlacementRepo::attach(&state.pool, &space, input.banner_id).await?;

    tracing::info!(
        space = %key,
        banner_id = input.banner_id,
        user_id = editor.user_id,
        "Placement attached"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: placement })))
}

/// PUT /api/v1/spaces/{key}/placements/order
///
/// Submit the complete desired order for the space. The payload must be a
/// permutation of the current placement set; an optional `version` rejects
/// stale bases with a retryable conflict.
pub async fn reorder(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let (version, entries) =
        PlacementRepo::reorder(&state.pool, &space, &input.banner_ids, input.version).await?;

    let now = chrono::Utc::now();
    let placements: Vec<AnnotatedPlacement> =
        entries.into_iter().map(|e| e.annotate(now)).collect();

    tracing::info!(space = %key, user_id = editor.user_id, "Placements reordered");

    Ok(Json(DataResponse {
        data: PlacementList {
            version,
            placements,
        },
    }))
}

/// POST /api/v1/spaces/{key}/placements/bulk-detach
///
/// Detach several banners in one atomic compaction pass.
pub async fn bulk_detach(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<DetachManyRequest>,
) -> AppResult<impl IntoResponse> {
    if input.banner_ids.is_empty() {
        return Err(AppError::BadRequest("banner_ids must not be empty".into()));
    }

    let space = space_by_key(&state.pool, &key).await?;
    let removed = PlacementRepo::detach_many(&state.pool, &space, &input.banner_ids).await?;

    tracing::info!(space = %key, removed, user_id = editor.user_id, "Placements bulk-detached");

    Ok(Json(DataResponse {
        data: BulkDetachResult { removed },
    }))
}

/// DELETE /api/v1/spaces/{key}/placements/{banner_id}
///
/// Detach one banner; remaining ranks are compacted.
pub async fn detach(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path((key, banner_id)): Path<(String, DbId)>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    PlacementRepo::detach(&state.pool, &space, banner_id).await?;

    tracing::info!(space = %key, banner_id, user_id = editor.user_id, "Placement detached");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/spaces/{key}/placements/{banner_id}/window
///
/// Set or clear the placement's visibility window. Rank is untouched.
pub async fn set_window(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path((key, banner_id)): Path<(String, DbId)>,
    Json(input): Json<SetWindowRequest>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let placement =
        PlacementRepo::set_window(&state.pool, &space, banner_id, input.starts_at, input.ends_at)
            .await?;

    tracing::info!(space = %key, banner_id, user_id = editor.user_id, "Placement window set");

    Ok(Json(DataResponse { data: placement }))
}

/// PUT /api/v1/spaces/{key}/placements/{banner_id}/active
///
/// Toggle the unwindowed visibility flag.
pub async fn set_active(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path((key, banner_id)): Path<(String, DbId)>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<impl IntoResponse> {
    let space = space_by_key(&state.pool, &key).await?;
    let placement =
        PlacementRepo::set_active(&state.pool, &space, banner_id, input.is_active).await?;

    Ok(Json(DataResponse { data: placement }))
}

/// POST /api/v1/spaces/{key}/placements/{banner_id}/move
///
/// Move the placement to another space as one all-or-nothing operation: a
/// rejection on the destination leaves the source untouched.
pub async fn move_placement(
    RequireEditor(editor): RequireEditor,
    State(state): State<AppState>,
    Path((key, banner_id)): Path<(String, DbId)>,
    Json(input): Json<MoveRequest>,
) -> AppResult<impl IntoResponse> {
    if input.to_space_key == key {
        return Err(AppError::BadRequest(
            "source and destination are the same space; use reorder instead".into(),
        ));
    }

    let source = space_by_key(&state.pool, &key).await?;
    let destination = space_by_key(&state.pool, &input.to_space_key).await?;

    let placement =
        PlacementRepo::move_to_space(&state.pool, &source, &destination, banner_id, input.index)
            .await?;

    tracing::info!(
        from = %key,
        to = %input.to_space_key,
        banner_id,
        user_id = editor.user_id,
        "Placement moved"
    );

    Ok(Json(DataResponse { data: placement }))
}
