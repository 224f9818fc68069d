pub mod in_memory;
pub mod local_disk;

pub use carledger_ledger_store::{Bytes, LedgerError, LedgerStore};

pub use in_memory::InMemoryLedger;
pub use local_disk::JsonFileLedger;
