//! Route definitions for the public storefront read path.

use axum::routing::get;
use axum::Router;

use crate::handlers::storefront;
use crate::state::AppState;

/// Storefront routes mounted at `/storefront`. No authentication: this is
/// the read path the public site consumes.
///
/// ```text
/// GET /spaces/{key}   -> get_visible_placements
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/spaces/{key}", get(storefront::get_visible_placements))
}
