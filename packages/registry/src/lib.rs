//! Car Registry
//!
//! Keeps a registry of cars inside a ledger store and governs how they change
//! hands. Each car lives under its own key as a JSON record; a car may be
//! transferred to a different owner at most [`MAX_TRANSFERS`] times.
//!
//! The registry works against any [`LedgerStore`]:
//!
//! ```rust
//! use carledger_registry::{CarRegistry, LedgerStore};
//! use carledger_json_ledger::InMemoryLedger;
//!
//! fn owned_by(store: &mut dyn LedgerStore, owner: &str) -> usize {
//!     CarRegistry::new()
//!         .list_by_owner(store, owner)
//!         .map(|cars| cars.len())
//!         .unwrap_or(0)
//! }
//!
//! let mut ledger = InMemoryLedger::new();
//! CarRegistry::new().seed(&mut ledger).unwrap();
//! assert_eq!(owned_by(&mut ledger, "Juan"), 1);
//! ```

mod car;
mod eligibility;
mod error;
mod registry;

pub use car::Car;
pub use eligibility::{check_transfer, is_eligible, TransferRefusal, MAX_TRANSFERS};
pub use error::RegistryError;
pub use registry::{starter_catalog, CarRegistry};

// Re-export ledger types for convenience
pub use carledger_ledger_store::{LedgerError, LedgerStore};
