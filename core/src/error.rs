//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Almost nothing in the documentation pipeline is fatal: reference failures are
//! surfaced as `AppError` values by the resolver and recovered by its callers.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum AppError {
    /// A `$ref` pointer names a location that does not exist in the document.
    #[from(ignore)]
    #[display("Reference not found: {pointer}")]
    ReferenceNotFound {
        /// The pointer exactly as written in the document.
        pointer: String,
    },

    /// A chain of pure `$ref` aliases loops back on itself.
    #[from(ignore)]
    #[display("Circular reference chain through: {pointer}")]
    CircularReference {
        /// The first pointer seen twice.
        pointer: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl AppError {
    /// Shorthand for [`AppError::ReferenceNotFound`].
    pub fn reference_not_found(pointer: impl Into<String>) -> Self {
        Self::ReferenceNotFound {
            pointer: pointer.into(),
        }
    }
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_conversion() {
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_reference_not_found_display() {
        let err = AppError::reference_not_found("#/components/schemas/Missing");
        assert_eq!(
            err.to_string(),
            "Reference not found: #/components/schemas/Missing"
        );
    }

    #[test]
    fn test_circular_display() {
        let err = AppError::CircularReference {
            pointer: "#/definitions/A".into(),
        };
        assert_eq!(
            format!("{}", err),
            "Circular reference chain through: #/definitions/A"
        );
    }
}
