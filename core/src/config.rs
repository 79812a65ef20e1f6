//! # Configuration
//!
//! Knobs for the grouping stage. Every field has a default, so an empty
//! configuration document (or none at all) is valid.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tag assigned to operations that declare none.
pub const DEFAULT_TAG: &str = "Default";

/// What to do when two distinct names sanitize to the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdCollisionPolicy {
    /// Keep both groups; later ones get `-2`, `-3`, ... appended to their id.
    #[default]
    Suffix,
    /// Fold later groups into the first group that claimed the id.
    Merge,
}

impl FromStr for IdCollisionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "suffix" => Ok(Self::Suffix),
            "merge" => Ok(Self::Merge),
            other => Err(AppError::General(format!(
                "Unknown id collision policy '{}', expected 'suffix' or 'merge'",
                other
            ))),
        }
    }
}

/// Options for building the documentation model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DocConfig {
    /// Section name for untagged operations.
    pub default_tag: String,
    /// Whether operations marked `deprecated: true` are documented.
    pub include_deprecated: bool,
    /// Id collision handling for sections and modules.
    pub id_collisions: IdCollisionPolicy,
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            default_tag: DEFAULT_TAG.to_string(),
            include_deprecated: true,
            id_collisions: IdCollisionPolicy::default(),
        }
    }
}
