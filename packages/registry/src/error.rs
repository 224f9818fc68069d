//! Error types for registry operations.

use carledger_ledger_store::LedgerError;

use crate::eligibility::TransferRefusal;

/// Everything a registry operation can fail with.
///
/// Store failures (`StoreRead`, `StoreWrite`) keep the ledger's error as their
/// source. The remaining variants are decided locally and deterministically:
/// retrying them with the same inputs against the same ledger state yields
/// the same outcome.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("error getting car, {source}")]
    StoreRead {
        /// The key being read, or `None` for a full scan.
        id: Option<String>,
        #[source]
        source: LedgerError,
    },

    #[error("failed operation, {source}")]
    StoreWrite {
        id: String,
        #[source]
        source: LedgerError,
    },

    #[error("record at key {key:?} is not a valid car: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("car {id:?} could not be encoded: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("car does not exist ID: {id}")]
    NotFound { id: String },

    #[error("unable to process transaction, car does not exist")]
    NoSuchAsset,

    #[error("the car with id {id} already exist")]
    AlreadyExists { id: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("unable to process transaction, car {id} already belongs to {owner}")]
    SameOwner { id: String, owner: String },

    #[error("unable to process, total car transaction {transfers} exceed the limit of {limit}")]
    TransferLimitExceeded { id: String, transfers: u32, limit: u32 },
}

impl RegistryError {
    /// Whether the failure comes from a registry rule rather than the ledger.
    ///
    /// Rule failures never touch the ledger and are not worth retrying.
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            RegistryError::NotFound { .. }
                | RegistryError::NoSuchAsset
                | RegistryError::AlreadyExists { .. }
                | RegistryError::Validation { .. }
                | RegistryError::SameOwner { .. }
                | RegistryError::TransferLimitExceeded { .. }
        )
    }

    pub(crate) fn refused(id: &str, refusal: TransferRefusal) -> Self {
        match refusal {
            TransferRefusal::NoSuchAsset => RegistryError::NoSuchAsset,
            TransferRefusal::SameOwner { owner } => RegistryError::SameOwner {
                id: id.to_string(),
                owner,
            },
            TransferRefusal::LimitExceeded { transfers, limit } => {
                RegistryError::TransferLimitExceeded {
                    id: id.to_string(),
                    transfers,
                    limit,
                }
            }
        }
    }
}
