//! # carledger-http
//!
//! A ledger store reached over HTTP.
//!
//! `HttpLedgerStore` speaks a small JSON API exposed by a ledger peer or a
//! gateway in front of one:
//!
//! | Operation  | Request                                   | Response                              |
//! |------------|-------------------------------------------|---------------------------------------|
//! | `get`      | `GET {base}/state/{key}`                  | `{"key", "value"}`, or 404 if absent  |
//! | `put`      | `PUT {base}/state/{key}` `{"value"}`      | any 2xx                               |
//! | `scan_all` | `GET {base}/state?page_size=N&bookmark=B` | `{"entries": [...], "bookmark"}`      |
//!
//! Values are base64 in transit. Any other status is reported as
//! `LedgerError::Protocol` carrying the status code and response body.
//!
//! The client is blocking; do not call it from inside an async runtime
//! without `spawn_blocking`.

pub mod error;
pub mod types;

mod blocking;

pub use blocking::{HttpLedgerStore, DEFAULT_PAGE_SIZE};
pub use error::Error;
pub use types::{PutState, ScanPage, StateEntry};
