//! Route definitions for the space directory.

use axum::routing::get;
use axum::Router;

use crate::handlers::spaces;
use crate::state::AppState;

/// Space routes mounted at `/spaces`.
///
/// ```text
/// GET    /        -> list_spaces
/// POST   /        -> create_space (admin only)
/// GET    /{key}   -> get_space
/// PUT    /{key}   -> update_space (admin only)
/// DELETE /{key}   -> delete_space (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(spaces::list_spaces).post(spaces::create_space))
        .route(
            "/{key}",
            get(spaces::get_space)
                .put(spaces::update_space)
                .delete(spaces::delete_space),
        )
}
