pub mod banners;
pub mod health;
pub mod placements;
pub mod spaces;
pub mod storefront;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /spaces                                        list (auth), create (admin)
/// /spaces/{key}                                  get, update, delete
/// /spaces/{key}/placements                       list, attach
/// /spaces/{key}/placements/order                 reorder (PUT)
/// /spaces/{key}/placements/bulk-detach           bulk detach (POST)
/// /spaces/{key}/placements/{banner_id}           detach (DELETE)
/// /spaces/{key}/placements/{banner_id}/window    set/clear window (PUT)
/// /spaces/{key}/placements/{banner_id}/active    toggle flag (PUT)
/// /spaces/{key}/placements/{banner_id}/move      cross-space move (POST)
///
/// /banners                                       list, create
/// /banners/{id}                                  get, update, delete
///
/// /storefront/spaces/{key}                       visible placements (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/spaces", spaces::router())
        .nest("/spaces", placements::router())
        .nest("/banners", banners::router())
        .nest("/storefront", storefront::router())
}
