//! In-memory ordered ledger.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use carledger_ledger_store::{
    Bytes, LedgerCursor, LedgerEntry, LedgerError, LedgerStore, VecCursor,
};

/// An in-memory ledger keyed in byte order.
///
/// `scan_all` copies the entries up front. The cursor still borrows the
/// ledger, so no write can happen while it is open. The ledger counts cursors
/// that have been opened but not closed; see
/// [`open_cursors`](InMemoryLedger::open_cursors).
///
/// # Example
///
/// ```rust
/// use carledger_json_ledger::{Bytes, InMemoryLedger, LedgerStore};
///
/// let mut ledger = InMemoryLedger::new();
/// ledger.put("12", Bytes::from_static(b"{}")).unwrap();
///
/// assert_eq!(ledger.get("12").unwrap(), Some(Bytes::from_static(b"{}")));
/// assert_eq!(ledger.get("99").unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    entries: BTreeMap<String, Bytes>,
    open_cursors: Arc<AtomicUsize>,
}

impl InMemoryLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger with initial entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Bytes>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            open_cursors: Arc::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cursors handed out by `scan_all` that have not been closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError> {
        let snapshot = self
            .entries
            .iter()
            .map(|(key, value)| LedgerEntry::new(key.clone(), value.clone()))
            .collect();

        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(SnapshotCursor {
            inner: VecCursor::new(snapshot),
            open_cursors: self.open_cursors.clone(),
        }))
    }
}

struct SnapshotCursor {
    inner: VecCursor,
    open_cursors: Arc<AtomicUsize>,
}

impl LedgerCursor for SnapshotCursor {
    fn has_next(&mut self) -> bool {
        self.inner.has_next()
    }

    fn next_entry(&mut self) -> Result<LedgerEntry, LedgerError> {
        self.inner.next_entry()
    }

    fn close(&mut self) -> Result<(), LedgerError> {
        if !self.inner.is_closed() {
            self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        }
        self.inner.close()
    }
}
