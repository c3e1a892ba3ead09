//! HTTP handlers, one module per resource.

pub mod banners;
pub mod placements;
pub mod spaces;
pub mod storefront;

use vitrine_core::ordering::PlacementError;
use vitrine_db::models::space::Space;
use vitrine_db::repositories::SpaceRepo;
use vitrine_db::DbPool;

use crate::error::AppError;

/// Resolve a space by its key or fail with `SPACE_NOT_FOUND`.
pub(crate) async fn space_by_key(pool: &DbPool, key: &str) -> Result<Space, AppError> {
    SpaceRepo::find_by_key(pool, key)
        .await?
        .ok_or_else(|| AppError::Placement(PlacementError::SpaceNotFound { key: key.to_string() }))
}
