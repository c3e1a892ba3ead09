//! Route definitions for the placement engine.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::placements;
use crate::state::AppState;

/// Placement routes, space-scoped, mounted at `/spaces`.
///
/// ```text
/// GET    /{key}/placements                      -> list_placements
/// POST   /{key}/placements                      -> attach
/// PUT    /{key}/placements/order                -> reorder
/// POST   /{key}/placements/bulk-detach          -> bulk_detach
/// DELETE /{key}/placements/{banner_id}          -> detach
/// PUT    /{key}/placements/{banner_id}/window   -> set_window
/// PUT    /{key}/placements/{banner_id}/active   -> set_active
/// POST   /{key}/placements/{banner_id}/move     -> move_placement
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{key}/placements",
            get(placements::list_placements).post(placements::attach),
        )
        .route("/{key}/placements/order", put(placements::reorder))
        .route(
            "/{key}/placements/bulk-detach",
            post(placements::bulk_detach),
        )
        .route(
            "/{key}/placements/{banner_id}",
            axum::routing::delete(placements::detach),
        )
        .route(
            "/{key}/placements/{banner_id}/window",
            put(placements::set_window),
        )
        .route(
            "/{key}/placements/{banner_id}/active",
            put(placements::set_active),
        )
        .route(
            "/{key}/placements/{banner_id}/move",
            post(placements::move_placement),
        )
}
