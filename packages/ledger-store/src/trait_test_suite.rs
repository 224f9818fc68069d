//! Conformance checks every `LedgerStore` implementation should pass.
//!
//! Each check takes a factory producing a fresh, empty store.

use bytes::Bytes;

use crate::{LedgerEntry, LedgerError, LedgerStore, ScopedCursor};

fn collect_all<S: LedgerStore>(store: &mut S) -> Vec<LedgerEntry> {
    let mut cursor = ScopedCursor::new(store.scan_all().unwrap());
    let entries = cursor.by_ref().collect::<Result<Vec<_>, LedgerError>>();
    cursor.finish().unwrap();
    entries.unwrap()
}

pub fn get_missing_key_is_none<S: LedgerStore>(store_factory: fn() -> S) {
    let mut store = store_factory();
    assert_eq!(store.get("missing").unwrap(), None);
}

pub fn put_then_get_works<S: LedgerStore>(store_factory: fn() -> S) {
    let mut store = store_factory();

    store.put("12", Bytes::from_static(b"{\"a\":1}")).unwrap();
    assert_eq!(
        store.get("12").unwrap(),
        Some(Bytes::from_static(b"{\"a\":1}"))
    );
}

pub fn put_overwrites<S: LedgerStore>(store_factory: fn() -> S) {
    let mut store = store_factory();

    store.put("12", Bytes::from_static(b"first")).unwrap();
    store.put("12", Bytes::from_static(b"second")).unwrap();

    assert_eq!(
        store.get("12").unwrap(),
        Some(Bytes::from_static(b"second"))
    );
    assert_eq!(collect_all(&mut store).len(), 1);
}

pub fn scan_empty_yields_nothing<S: LedgerStore>(store_factory: fn() -> S) {
    let mut store = store_factory();
    assert!(collect_all(&mut store).is_empty());
}

pub fn scan_is_key_ordered<S: LedgerStore>(store_factory: fn() -> S) {
    let mut store = store_factory();

    for key in ["22", "12", "b", "a/b", "A"] {
        store.put(key, Bytes::copy_from_slice(key.as_bytes())).unwrap();
    }

    let entries = collect_all(&mut store);
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["12", "22", "A", "a/b", "b"]);

    for entry in &entries {
        assert_eq!(entry.value, Bytes::copy_from_slice(entry.key.as_bytes()));
    }
}

pub fn run_all<S: LedgerStore>(store_factory: fn() -> S) {
    get_missing_key_is_none(store_factory);
    put_then_get_works(store_factory);
    put_overwrites(store_factory);
    scan_empty_yields_nothing(store_factory);
    scan_is_key_ordered(store_factory);
}
