//! The namespaced identifier value type.

use std::fmt;
use std::str::FromStr;

use crate::IdentError;

/// A namespace-qualified identifier with canonical form `{namespace}:{path}`.
///
/// Both components are validated at construction and never change afterwards.
/// Equality, ordering, and hashing are derived from the `(namespace, path)`
/// pair, case-sensitive, with no normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ident {
    namespace: String,
    path: String,
}

impl Ident {
    /// Separator between namespace and path in the canonical form.
    pub const SEPARATOR: char = ':';

    /// Creates an identifier from its two components.
    ///
    /// The namespace must be non-empty and match `[a-z0-9_.-]`; the path must
    /// be non-empty and match `[a-z0-9_./-]`. Uppercase input is rejected,
    /// not folded.
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Result<Self, IdentError> {
        let namespace = namespace.into();
        let path = path.into();

        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(IdentError::InvalidNamespace { namespace });
        }
        if path.is_empty() || !path.chars().all(is_path_char) {
            return Err(IdentError::InvalidPath { path });
        }

        Ok(Self { namespace, path })
    }

    /// Parses an identifier from its combined `{namespace}:{path}` form.
    ///
    /// Splits on the first `:`. Since `:` is outside the path character
    /// class, a second colon fails path validation, so exactly one separator
    /// is accepted overall.
    pub fn parse(s: &str) -> Result<Self, IdentError> {
        if s.is_empty() {
            return Err(IdentError::Empty);
        }

        let Some((namespace, path)) = s.split_once(Self::SEPARATOR) else {
            return Err(IdentError::MissingSeparator);
        };

        Self::new(namespace, path)
    }

    /// Parses an identifier, returning `None` instead of an error.
    ///
    /// For call sites that treat a malformed identifier as an ordinary miss.
    #[must_use]
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::parse(s).ok()
    }

    /// Returns the namespace component.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, Self::SEPARATOR, self.path)
    }
}

impl FromStr for Ident {
    type Err = IdentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Ident {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Ident {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
