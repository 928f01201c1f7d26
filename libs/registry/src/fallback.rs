//! Miss policies for registry lookups.

use quarry_ident::Ident;

/// Supplies substitutes when a forward or reverse lookup misses.
///
/// Every provider defaults to absent, so a policy only overrides the misses
/// it actually wants to absorb.
pub trait FallbackPolicy<T> {
    /// Substitute for a missing value in `get` / `get_by_raw`.
    fn value_miss(&self) -> Option<T> {
        None
    }

    /// Substitute for a missing identifier in reverse lookup.
    fn ident_miss(&self) -> Option<Ident> {
        None
    }

    /// Substitute for a missing raw id in reverse lookup.
    fn raw_miss(&self) -> Option<u32> {
        None
    }
}

/// Every miss stays a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl<T> FallbackPolicy<T> for NoFallback {}

/// Fixed defaults handed out on every miss.
///
/// The raw id is a caller-supplied constant. It is not derived from the
/// default value's actual assignment, which may not even be registered.
#[derive(Debug, Clone)]
pub struct FixedFallback<T> {
    value: T,
    ident: Ident,
    raw: u32,
}

impl<T> FixedFallback<T> {
    /// Creates a policy returning the given defaults on every miss.
    pub fn new(value: T, ident: Ident, raw: u32) -> Self {
        Self { value, ident, raw }
    }
}

impl<T: Clone> FallbackPolicy<T> for FixedFallback<T> {
    fn value_miss(&self) -> Option<T> {
        Some(self.value.clone())
    }

    fn ident_miss(&self) -> Option<Ident> {
        Some(self.ident.clone())
    }

    fn raw_miss(&self) -> Option<u32> {
        Some(self.raw)
    }
}
