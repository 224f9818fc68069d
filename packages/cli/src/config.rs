//! Command-line configuration and ledger selection.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use carledger_http::HttpLedgerStore;
use carledger_json_ledger::JsonFileLedger;
use carledger_ledger_store::LedgerStore;

use crate::error::CliError;

/// carledger - register cars and transfer their ownership
#[derive(Parser, Debug)]
#[command(name = "carledger")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory of a local ledger (created if missing)
    #[arg(long, env = "CARLEDGER_DIR", conflicts_with = "url", global = true)]
    pub dir: Option<PathBuf>,

    /// Base URL of a remote ledger
    #[arg(long, env = "CARLEDGER_URL", global = true)]
    pub url: Option<String>,

    /// Request timeout for a remote ledger, in seconds
    #[arg(long, env = "CARLEDGER_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install the starter catalog
    Seed,
    /// List every car
    List,
    /// List the cars held by an owner
    Owner { name: String },
    /// Show one car
    Get { id: String },
    /// Check whether a car is registered
    Exists { id: String },
    /// Register a new car
    Create {
        id: String,
        brand: String,
        owner: String,
    },
    /// Transfer a car to a new owner
    Transfer { id: String, new_owner: String },
}

/// Where the registry's data lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerTarget {
    Local(PathBuf),
    Remote { url: String, timeout: Duration },
}

impl Args {
    pub fn target(&self) -> Result<LedgerTarget, CliError> {
        if let Some(url) = &self.url {
            return Ok(LedgerTarget::Remote {
                url: url.clone(),
                timeout: Duration::from_secs(self.timeout_secs),
            });
        }

        match &self.dir {
            Some(dir) => Ok(LedgerTarget::Local(dir.clone())),
            None => default_ledger_dir().map(LedgerTarget::Local),
        }
    }
}

fn default_ledger_dir() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("carledger"))
        .ok_or(CliError::NoDataDir)
}

impl LedgerTarget {
    pub fn open(&self) -> Result<Box<dyn LedgerStore>, CliError> {
        match self {
            LedgerTarget::Local(dir) => {
                tracing::debug!(dir = %dir.display(), "opening local ledger");
                Ok(Box::new(JsonFileLedger::create(dir.clone())?))
            }
            LedgerTarget::Remote { url, timeout } => {
                tracing::debug!(%url, ?timeout, "opening remote ledger");
                Ok(Box::new(HttpLedgerStore::with_timeout(url, *timeout)?))
            }
        }
    }
}
