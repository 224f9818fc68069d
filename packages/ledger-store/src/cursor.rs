//! Cursor helpers: a buffered cursor and a guard that always closes.

use crate::{LedgerCursor, LedgerEntry, LedgerError};

/// A cursor over entries that are already in memory.
///
/// Useful for ledgers that snapshot a scan up front, and for tests.
#[derive(Debug)]
pub struct VecCursor {
    entries: std::vec::IntoIter<LedgerEntry>,
    closed: bool,
}

impl VecCursor {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self {
            entries: entries.into_iter(),
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl LedgerCursor for VecCursor {
    fn has_next(&mut self) -> bool {
        !self.closed && !self.entries.as_slice().is_empty()
    }

    fn next_entry(&mut self) -> Result<LedgerEntry, LedgerError> {
        if self.closed {
            return Err(LedgerError::CursorClosed);
        }
        self.entries.next().ok_or(LedgerError::CursorExhausted)
    }

    fn close(&mut self) -> Result<(), LedgerError> {
        self.closed = true;
        self.entries = Vec::new().into_iter();
        Ok(())
    }
}

/// Owns a cursor and closes it when dropped.
///
/// Iterating yields `Result<LedgerEntry, LedgerError>` until the cursor runs
/// dry. Call [`finish`](ScopedCursor::finish) on the success path to observe
/// close failures; on every other path (early return, `?`, panic unwinding)
/// the guard closes the cursor itself and logs a failed close.
pub struct ScopedCursor<'a> {
    inner: Option<Box<dyn LedgerCursor + 'a>>,
}

impl<'a> ScopedCursor<'a> {
    pub fn new(cursor: Box<dyn LedgerCursor + 'a>) -> Self {
        Self {
            inner: Some(cursor),
        }
    }

    /// Close the cursor now and report the outcome.
    pub fn finish(mut self) -> Result<(), LedgerError> {
        match self.inner.take() {
            Some(mut cursor) => cursor.close(),
            None => Ok(()),
        }
    }
}

impl Iterator for ScopedCursor<'_> {
    type Item = Result<LedgerEntry, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.inner.as_mut()?;
        if !cursor.has_next() {
            return None;
        }
        Some(cursor.next_entry())
    }
}

impl Drop for ScopedCursor<'_> {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.inner.take() {
            if let Err(error) = cursor.close() {
                tracing::warn!(%error, "failed to close ledger cursor");
            }
        }
    }
}
