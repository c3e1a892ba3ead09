//! Role name constants shared between the API layer and token issuance.

/// Full administrative access, including space configuration.
pub const ROLE_ADMIN: &str = "admin";

/// May manage banners and placements but not space configuration.
pub const ROLE_EDITOR: &str = "editor";
