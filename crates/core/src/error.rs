use crate::types::DbId;

/// Generic domain errors shared across the platform.
///
/// Placement-specific failures have their own taxonomy in
/// [`crate::ordering::PlacementError`]; this enum covers the ambient cases
/// (validation, auth propagation, internal faults).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
