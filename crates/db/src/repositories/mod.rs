//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Placement mutations run
//! their validation and rank rewrites inside a single transaction so an
//! interrupted operation can never leave a space with gapped or duplicate
//! positions.

pub mod banner_repo;
pub mod placement_repo;
pub mod space_repo;

pub use banner_repo::BannerRepo;
pub use placement_repo::PlacementRepo;
pub use space_repo::SpaceRepo;

use vitrine_core::ordering::PlacementError;

/// Error type for repositories that enforce placement invariants.
///
/// Domain rejections (`Placement`) are detected before any write; database
/// errors surface unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
