//! carledger: a registry of cars kept in an ordered key-value ledger.
//!
//! Cars are created once, looked up by id or owner, and change hands through
//! `transfer`, which refuses no-op transfers and freezes a car after
//! [`MAX_TRANSFERS`] ownership changes. The ledger itself is pluggable: an
//! in-memory map, a directory of JSON files, or a remote ledger over HTTP.
//!
//! ```rust
//! use carledger::{CarRegistry, InMemoryLedger, RegistryError};
//!
//! let registry = CarRegistry::new();
//! let mut ledger = InMemoryLedger::new();
//! registry.seed(&mut ledger).unwrap();
//!
//! let car = registry.transfer(&mut ledger, "12", "Marcos").unwrap();
//! assert_eq!((car.owner.as_str(), car.transfers_count), ("Marcos", 1));
//!
//! assert!(matches!(
//!     registry.transfer(&mut ledger, "12", "Marcos"),
//!     Err(RegistryError::SameOwner { .. })
//! ));
//! ```

pub use carledger_registry::{
    check_transfer, is_eligible, starter_catalog, Car, CarRegistry, RegistryError,
    TransferRefusal, MAX_TRANSFERS,
};

pub use carledger_ledger_store::{
    Bytes, LedgerCursor, LedgerEntry, LedgerError, LedgerStore, ScopedCursor,
};

pub use carledger_json_ledger::{InMemoryLedger, JsonFileLedger};

#[cfg(feature = "http")]
pub use carledger_http::HttpLedgerStore;
