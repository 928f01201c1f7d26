//! The registry core: triple-indexed storage and the freeze protocol.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwapOption;
use rand::Rng;
use tracing::{debug, info, warn};

use quarry_ident::Ident;

use crate::fallback::{FallbackPolicy, FixedFallback, NoFallback};
use crate::RegistryError;

/// The four indexes, always mutated together under the building lock.
///
/// `by_raw` doubles as the dense raw-id index and the canonical enumeration
/// order: entry `i` was the `i`-th successful registration.
#[derive(Debug)]
struct Tables<T> {
    by_ident: HashMap<Ident, T>,
    by_raw: Vec<T>,
    ident_of: HashMap<T, Ident>,
    raw_of: HashMap<T, u32>,
}

impl<T> Default for Tables<T> {
    fn default() -> Self {
        Self {
            by_ident: HashMap::new(),
            by_raw: Vec::new(),
            ident_of: HashMap::new(),
            raw_of: HashMap::new(),
        }
    }
}

/// An identifier-keyed store with dense raw ids and full reverse lookup.
///
/// A registry has two behavioral modes. While **building**, a single mutex
/// guards all four indexes for both reads and writes. Once [`freeze`] runs,
/// the tables move into an immutable snapshot and every later read is a
/// lock-free pointer load; no writer can ever run again.
///
/// Reverse lookup is keyed by the value itself, so `T` supplies the
/// equality and hashing strategy through its own `Eq + Hash` impls.
///
/// The fallback policy `F` decides what a lookup miss yields: absent for
/// [`NoFallback`], fixed defaults for [`FixedFallback`].
///
/// [`freeze`]: Registry::freeze
pub struct Registry<T, F = NoFallback> {
    building: Mutex<Tables<T>>,
    frozen: ArcSwapOption<Tables<T>>,
    fallback: F,
}

impl<T> Registry<T> {
    /// Creates an empty, unfrozen registry whose lookups miss with `None`.
    pub fn new() -> Self {
        Self::with_fallback(NoFallback)
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry whose lookups yield fixed defaults instead of missing.
pub type DefaultedRegistry<T> = Registry<T, FixedFallback<T>>;

impl<T> Registry<T, FixedFallback<T>> {
    /// Creates an empty registry that answers every miss with the given
    /// default value, identifier, and raw id.
    ///
    /// The defaults are returned whether or not they were ever registered.
    pub fn with_defaults(value: T, ident: Ident, raw: u32) -> Self {
        Self::with_fallback(FixedFallback::new(value, ident, raw))
    }
}

impl<T, F> Registry<T, F> {
    /// Creates an empty, unfrozen registry with the given fallback policy.
    pub fn with_fallback(fallback: F) -> Self {
        Self {
            building: Mutex::new(Tables::default()),
            frozen: ArcSwapOption::const_empty(),
            fallback,
        }
    }

    /// Runs `f` against a consistent view of the tables.
    ///
    /// Frozen snapshot if present (lock-free), otherwise the building tables
    /// under the lock. The frozen slot is re-checked after acquiring the
    /// lock: freeze publishes the snapshot while still holding the lock, so
    /// a reader that lost that race finds the snapshot here instead of the
    /// emptied building tables.
    fn with_tables<R>(&self, f: impl FnOnce(&Tables<T>) -> R) -> R {
        if let Some(tables) = self.frozen.load_full() {
            return f(&tables);
        }
        let guard = self
            .building
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(tables) = self.frozen.load_full() {
            return f(&tables);
        }
        f(&guard)
    }

    /// Transitions the registry from Building to Frozen.
    ///
    /// Idempotent: calling it again is a no-op. After it returns, every
    /// `register` call fails with [`RegistryError::Frozen`] and reads no
    /// longer take the lock.
    pub fn freeze(&self) {
        let mut guard = self
            .building
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.frozen.load().is_some() {
            return;
        }
        let tables = std::mem::take(&mut *guard);
        info!(entries = tables.by_raw.len(), "registry frozen");
        // Published before the lock is released, so with_tables always finds
        // either the full building tables or this snapshot, never the
        // emptied leftovers.
        self.frozen.store(Some(Arc::new(tables)));
    }

    /// Returns true once [`freeze`](Registry::freeze) has completed.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load().is_some()
    }

    /// Returns the number of registered entries.
    pub fn len(&self) -> usize {
        self.with_tables(|t| t.by_raw.len())
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the identifier is registered. No fallback applies.
    pub fn contains(&self, ident: &Ident) -> bool {
        self.with_tables(|t| t.by_ident.contains_key(ident))
    }

    /// Returns true if the raw id is assigned. No fallback applies.
    pub fn contains_raw(&self, raw: u32) -> bool {
        self.with_tables(|t| (raw as usize) < t.by_raw.len())
    }
}

impl<T, F> Registry<T, F>
where
    T: Clone + Eq + Hash,
    F: FallbackPolicy<T>,
{
    /// Registers `value` under `ident` and returns the stored value.
    ///
    /// Re-registering an identifier returns the value already stored for it,
    /// unchanged; the first writer for a given identifier wins. Registering
    /// a value that is already bound to a *different* identifier fails with
    /// [`RegistryError::DuplicateValue`]. After [`freeze`](Registry::freeze),
    /// every call fails with [`RegistryError::Frozen`].
    ///
    /// A failed call leaves all four indexes exactly as they were.
    pub fn register(&self, ident: Ident, value: T) -> Result<T, RegistryError> {
        if self.is_frozen() {
            warn!(%ident, "registration rejected: registry is frozen");
            return Err(RegistryError::Frozen(ident));
        }

        let mut tables = self
            .building
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // freeze may have won the race between the check above and the lock
        if self.is_frozen() {
            warn!(%ident, "registration rejected: registry is frozen");
            return Err(RegistryError::Frozen(ident));
        }

        // Identifier check before value check: re-registering the same
        // (ident, value) pair is a no-op, never a duplicate-value error.
        if let Some(existing) = tables.by_ident.get(&ident) {
            return Ok(existing.clone());
        }

        if let Some(bound) = tables.ident_of.get(&value) {
            warn!(%ident, bound = %bound, "registration rejected: value already bound");
            return Err(RegistryError::DuplicateValue(bound.clone()));
        }

        let raw = tables.by_raw.len() as u32;
        tables.by_ident.insert(ident.clone(), value.clone());
        tables.by_raw.push(value.clone());
        tables.ident_of.insert(value.clone(), ident.clone());
        tables.raw_of.insert(value.clone(), raw);

        debug!(%ident, raw, "registered entry");
        Ok(value)
    }

    /// Looks up a value by identifier, resolving a miss through the
    /// fallback policy.
    pub fn get(&self, ident: &Ident) -> Option<T> {
        self.with_tables(|t| t.by_ident.get(ident).cloned())
            .or_else(|| self.fallback.value_miss())
    }

    /// Looks up a value by raw id, resolving a miss through the fallback
    /// policy.
    pub fn get_by_raw(&self, raw: u32) -> Option<T> {
        self.with_tables(|t| t.by_raw.get(raw as usize).cloned())
            .or_else(|| self.fallback.value_miss())
    }

    /// Reverse lookup: the identifier a value is registered under,
    /// resolving a miss through the fallback policy.
    pub fn ident_of(&self, value: &T) -> Option<Ident> {
        self.with_tables(|t| t.ident_of.get(value).cloned())
            .or_else(|| self.fallback.ident_miss())
    }

    /// Reverse lookup: the raw id assigned to a value, resolving a miss
    /// through the fallback policy.
    pub fn raw_of(&self, value: &T) -> Option<u32> {
        self.with_tables(|t| t.raw_of.get(value).copied())
            .or_else(|| self.fallback.raw_miss())
    }

    /// Picks a uniformly random registered value.
    pub fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<T, RegistryError> {
        self.with_tables(|t| {
            if t.by_raw.is_empty() {
                return Err(RegistryError::Empty);
            }
            let index = rng.random_range(0..t.by_raw.len());
            Ok(t.by_raw[index].clone())
        })
    }

    /// Returns a point-in-time copy of all values in registration order.
    ///
    /// Registrations after the call do not affect the returned vector.
    pub fn snapshot(&self) -> Vec<T> {
        self.with_tables(|t| t.by_raw.clone())
    }

    /// Iterates a snapshot of the values in registration order.
    ///
    /// The snapshot is taken at call time; each call yields a fresh,
    /// independent iteration that concurrent registration cannot disturb.
    pub fn iter(&self) -> std::vec::IntoIter<T> {
        self.snapshot().into_iter()
    }
}
