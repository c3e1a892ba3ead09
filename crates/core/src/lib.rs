//! Vitrine domain core.
//!
//! Pure domain logic for the banner placement engine, with zero internal
//! deps so it can be used by the repository layer, the API server, and any
//! future CLI or client tooling:
//!
//! - [`status`]: derives a placement's display status from its time window
//! - [`ordering`]: validation half of the ordering protocol and the
//!   placement error taxonomy
//! - [`projection`]: client-side optimistic cache for drag reordering
//! - [`space`]: space layout kinds and the capacity invariant

pub mod error;
pub mod ordering;
pub mod projection;
pub mod roles;
pub mod space;
pub mod status;
pub mod types;
