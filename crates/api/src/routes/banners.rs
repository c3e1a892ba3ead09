//! Route definitions for the banner catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::banners;
use crate::state::AppState;

/// Banner routes mounted at `/banners`.
///
/// ```text
/// GET    /       -> list_banners
/// POST   /       -> create_banner (editor)
/// GET    /{id}   -> get_banner
/// PUT    /{id}   -> update_banner (editor)
/// DELETE /{id}   -> delete_banner (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(banners::list_banners).post(banners::create_banner))
        .route(
            "/{id}",
            get(banners::get_banner)
                .put(banners::update_banner)
                .delete(banners::delete_banner),
        )
}
