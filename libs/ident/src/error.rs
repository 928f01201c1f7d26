//! Error types for identifier parsing and validation.

use thiserror::Error;

/// Errors that can occur when constructing or parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentError {
    /// The identifier string is empty.
    #[error("identifier cannot be empty")]
    Empty,

    /// The identifier is missing the `:` separator.
    #[error("identifier missing ':' separator")]
    MissingSeparator,

    /// The namespace is empty or contains a character outside `[a-z0-9_.-]`.
    #[error("invalid namespace '{namespace}': must be non-empty and match [a-z0-9_.-]")]
    InvalidNamespace { namespace: String },

    /// The path is empty or contains a character outside `[a-z0-9_./-]`.
    #[error("invalid path '{path}': must be non-empty and match [a-z0-9_./-]")]
    InvalidPath { path: String },
}

impl IdentError {
    /// Returns true if this error indicates the input was empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IdentError::Empty)
    }

    /// Returns true if this error indicates a rejected namespace or path.
    pub fn is_component_error(&self) -> bool {
        matches!(
            self,
            IdentError::InvalidNamespace { .. } | IdentError::InvalidPath { .. }
        )
    }
}
