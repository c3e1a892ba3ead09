//! Space layout kinds and the capacity invariant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How a space lays out its banners on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Slider,
    Grid,
    Single,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slider => "slider",
            Self::Grid => "grid",
            Self::Single => "single",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slider" => Ok(Self::Slider),
            "grid" => Ok(Self::Grid),
            "single" => Ok(Self::Single),
            other => Err(CoreError::Validation(format!(
                "Unknown layout kind: {other}"
            ))),
        }
    }
}

/// Validate a space's layout/capacity combination.
///
/// `single` layouts are hard-capped at one placement; downstream renderers
/// assume it, so it is enforced here and by a database check constraint
/// rather than left as a configuration convention.
pub fn validate_capacity(layout_kind: LayoutKind, max_items: i32) -> Result<(), CoreError> {
    if max_items < 1 {
        return Err(CoreError::Validation(format!(
            "max_items must be at least 1, got {max_items}"
        )));
    }
    if layout_kind == LayoutKind::Single && max_items != 1 {
        return Err(CoreError::Validation(format!(
            "single layout requires max_items = 1, got {max_items}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("slider".parse::<LayoutKind>().unwrap(), LayoutKind::Slider);
        assert_eq!("grid".parse::<LayoutKind>().unwrap(), LayoutKind::Grid);
        assert_eq!("single".parse::<LayoutKind>().unwrap(), LayoutKind::Single);
        assert!("carousel".parse::<LayoutKind>().is_err());
    }

    #[test]
    fn single_layout_caps_at_one() {
        assert!(validate_capacity(LayoutKind::Single, 1).is_ok());
        assert!(validate_capacity(LayoutKind::Single, 3).is_err());
    }

    #[test]
    fn multi_layouts_take_any_positive_capacity() {
        assert!(validate_capacity(LayoutKind::Slider, 5).is_ok());
        assert!(validate_capacity(LayoutKind::Grid, 12).is_ok());
        assert!(validate_capacity(LayoutKind::Grid, 0).is_err());
    }
}
