//! Core traits for the ledger layer.

use bytes::Bytes;

use crate::LedgerError;

/// A single key/value pair yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub key: String,
    pub value: Bytes,
}

impl LedgerEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Bytes>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A cursor over the results of a range scan.
///
/// Cursors hold resources in the underlying ledger (open iterators, pagination
/// state, file handles). They must be closed once the caller is done with
/// them, whether or not every entry was consumed. Wrap them in a
/// [`ScopedCursor`](crate::ScopedCursor) to get that on every exit path.
pub trait LedgerCursor: Send {
    /// Whether another entry can be requested with `next_entry`.
    ///
    /// A cursor may report `true` and then fail in `next_entry` if fetching
    /// the entry hits a transport error.
    fn has_next(&mut self) -> bool;

    /// Advance the cursor and return the next entry.
    fn next_entry(&mut self) -> Result<LedgerEntry, LedgerError>;

    /// Release the cursor. Closing an already closed cursor is a no-op.
    fn close(&mut self) -> Result<(), LedgerError>;
}

/// An ordered key-value ledger holding raw bytes.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn LedgerStore>`.
pub trait LedgerStore: Send + Sync {
    /// Read the bytes stored under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under the key (not an error condition).
    /// * `Ok(Some(bytes))` - The stored value.
    /// * `Err(LedgerError)` - A transport or system error occurred.
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError>;

    /// Open a cursor over every entry in the ledger, in key order.
    fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError>;
}

// Blanket implementations for references and boxes

impl<T: LedgerStore + ?Sized> LedgerStore for &mut T {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        (**self).put(key, value)
    }

    fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError> {
        (**self).scan_all()
    }
}

impl<T: LedgerStore + ?Sized> LedgerStore for Box<T> {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError> {
        self.as_mut().get(key)
    }

    fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        self.as_mut().put(key, value)
    }

    fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError> {
        self.as_mut().scan_all()
    }
}

impl<T: LedgerCursor + ?Sized> LedgerCursor for Box<T> {
    fn has_next(&mut self) -> bool {
        self.as_mut().has_next()
    }

    fn next_entry(&mut self) -> Result<LedgerEntry, LedgerError> {
        self.as_mut().next_entry()
    }

    fn close(&mut self) -> Result<(), LedgerError> {
        self.as_mut().close()
    }
}
