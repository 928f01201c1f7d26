//! # quarry-registry
//!
//! Identifier-keyed registries with dense raw ids, full reverse lookup, and a
//! one-way bootstrap → freeze lifecycle.
//!
//! ## Design Principles
//!
//! - Registration is append-only: entries are never removed or rebound
//! - Every value gets exactly one identifier and one dense raw id
//! - Registration is idempotent per identifier; the first writer wins
//! - Freezing is a single legal transition from Building to Frozen; after it,
//!   reads are lock-free and writes are rejected
//!
//! ## Lifecycle
//!
//! A registry is created empty and mutable. Host bootstrap code calls
//! [`Registry::register`] repeatedly, then [`Registry::freeze`] once. From
//! that point the registry is a read-only structure for the rest of the
//! process lifetime, safe to resolve from any thread without coordination.

mod error;
mod fallback;
mod registry;

pub use error::RegistryError;
pub use fallback::{FallbackPolicy, FixedFallback, NoFallback};
pub use registry::{DefaultedRegistry, Registry};
