//! # quarry-ident
//!
//! Namespaced identifier type, parsing, and validation for quarry registries.
//!
//! ## Design Principles
//!
//! - Identifiers are immutable and validated once, at construction
//! - All identifiers have a canonical string representation with strict parsing
//! - Identifiers support roundtrip serialization (parse → format → parse)
//! - No normalization: input must already be lowercase, mismatches are rejected
//!
//! ## Identifier Format
//!
//! Every identifier is a two-part key in the form `{namespace}:{path}`.
//!
//! Examples:
//! - `quarry:stone`
//! - `quarry:ores/deepslate_iron`
//! - `thirdparty.pack-2:blocks/slab.oak`
//!
//! The namespace accepts `[a-z0-9_.-]`, the path additionally accepts `/`.
//! Both parts must be non-empty.

mod error;
mod ident;

pub use error::IdentError;
pub use ident::Ident;
