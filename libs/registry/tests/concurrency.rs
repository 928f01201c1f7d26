//! Cross-thread behavior of the registry.
//!
//! Covers concurrent bootstrap registration, the freeze transition racing
//! late writers, and lock-free reads after freeze.

use std::thread;

use quarry_ident::Ident;
use quarry_registry::{Registry, RegistryError};

fn ident(i: usize) -> Ident {
    Ident::new("stress", format!("entry/{}", i)).unwrap()
}

#[test]
fn concurrent_registration_assigns_dense_unique_raw_ids() {
    let registry = Registry::new();

    thread::scope(|scope| {
        for i in 0..200 {
            let registry = &registry;
            scope.spawn(move || {
                registry.register(ident(i), format!("value-{}", i)).unwrap();
            });
        }
    });

    assert_eq!(registry.len(), 200);

    let mut raws = Vec::new();
    for i in 0..200 {
        let value = registry.get(&ident(i)).unwrap();
        let raw = registry.raw_of(&value).unwrap();

        // forward and reverse indexes agree on every entry
        assert_eq!(registry.get_by_raw(raw), Some(value.clone()));
        assert_eq!(registry.ident_of(&value), Some(ident(i)));
        raws.push(raw);
    }

    raws.sort_unstable();
    assert_eq!(raws, (0..200).collect::<Vec<u32>>());
}

#[test]
fn concurrent_idempotent_registration_keeps_one_entry() {
    let registry = Registry::new();

    thread::scope(|scope| {
        for _ in 0..32 {
            let registry = &registry;
            scope.spawn(move || {
                let stored = registry.register(ident(0), "only".to_string()).unwrap();
                assert_eq!(stored, "only");
            });
        }
    });

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.raw_of(&"only".to_string()), Some(0));
}

#[test]
fn freeze_racing_writers_never_corrupts() {
    let registry = Registry::new();
    registry.register(ident(0), "seed".to_string()).unwrap();

    thread::scope(|scope| {
        for i in 1..64 {
            let registry = &registry;
            scope.spawn(move || {
                // each register either lands before the freeze or fails
                // cleanly with Frozen; nothing in between
                match registry.register(ident(i), format!("value-{}", i)) {
                    Ok(_) => {}
                    Err(RegistryError::Frozen(rejected)) => assert_eq!(rejected, ident(i)),
                    Err(other) => panic!("unexpected error: {}", other),
                }
            });
        }
        let registry = &registry;
        scope.spawn(move || registry.freeze());
    });

    assert!(registry.is_frozen());

    // every entry that made it in is fully indexed
    let entries = registry.snapshot();
    assert!(!entries.is_empty());
    for (i, value) in entries.iter().enumerate() {
        assert_eq!(registry.raw_of(value), Some(i as u32));
        let bound = registry.ident_of(value).unwrap();
        assert_eq!(registry.get(&bound), Some(value.clone()));
    }
}

#[test]
fn frozen_registry_serves_parallel_readers() {
    let registry = Registry::new();
    for i in 0..50 {
        registry.register(ident(i), format!("value-{}", i)).unwrap();
    }
    registry.freeze();

    thread::scope(|scope| {
        for _ in 0..8 {
            let registry = &registry;
            scope.spawn(move || {
                for i in 0..50 {
                    let value = registry.get(&ident(i)).unwrap();
                    assert_eq!(value, format!("value-{}", i));
                    assert_eq!(registry.ident_of(&value), Some(ident(i)));
                }
                assert_eq!(registry.len(), 50);
            });
        }
    });
}

#[test]
fn register_after_freeze_fails_from_any_thread() {
    let registry: Registry<String> = Registry::new();
    registry.freeze();

    thread::scope(|scope| {
        for i in 0..8 {
            let registry = &registry;
            scope.spawn(move || {
                let err = registry
                    .register(ident(i), format!("value-{}", i))
                    .unwrap_err();
                assert!(matches!(err, RegistryError::Frozen(_)));
            });
        }
    });

    assert!(registry.is_empty());
}
