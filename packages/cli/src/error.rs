use carledger_ledger_store::LedgerError;
use carledger_registry::RegistryError;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Registry(#[from] RegistryError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Remote ledger error: {0}")]
    Http(#[from] carledger_http::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No data directory found; pass --dir or --url")]
    NoDataDir,
}
