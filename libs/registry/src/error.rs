//! Error types for registry operations.
//!
//! Lookup misses are not errors; they resolve through the registry's
//! fallback policy instead.

use quarry_ident::Ident;
use thiserror::Error;

/// Errors that can occur when mutating or sampling a registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Registration attempted after the registry was frozen.
    ///
    /// Carries the identifier whose registration was rejected. This signals
    /// a bootstrap ordering bug in the caller; it is never retried.
    #[error("registry is frozen, cannot register '{0}'")]
    Frozen(Ident),

    /// The value is already registered under another identifier.
    ///
    /// Carries the identifier the value is already bound to.
    #[error("value is already registered under '{0}'")]
    DuplicateValue(Ident),

    /// Random pick from a registry with no entries.
    #[error("registry has no entries")]
    Empty,
}
