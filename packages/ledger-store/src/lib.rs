//! Ledger Store Traits
//!
//! This is the narrow waist between the car registry and whatever system of
//! record holds its data. Everything at this level is keys and bytes - no
//! record shapes, no business rules, no format interpretation.
//!
//! A ledger provides three capabilities:
//! - `get`: fetch the bytes stored under a key, if any
//! - `put`: store bytes under a key, replacing what was there
//! - `scan_all`: walk every entry in key order through a cursor
//!
//! Atomicity and durability are the ledger's business. Callers treat each
//! call as a synchronous step that either returns or fails.
//!
//! # Example
//!
//! ```rust
//! use carledger_ledger_store::{Bytes, LedgerError, LedgerStore};
//!
//! fn read_car(store: &mut dyn LedgerStore, id: &str) -> Result<Option<Bytes>, LedgerError> {
//!     store.get(id)
//! }
//! ```

pub use bytes::Bytes;

mod cursor;
mod error;
mod traits;

pub use cursor::{ScopedCursor, VecCursor};
pub use error::LedgerError;
pub use traits::{LedgerCursor, LedgerEntry, LedgerStore};

#[cfg(any(test, feature = "test-utils"))]
pub mod trait_test_suite;
