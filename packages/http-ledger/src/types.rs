//! Wire shapes exchanged with a remote ledger.
//!
//! Values travel as standard base64 so arbitrary bytes survive JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use carledger_ledger_store::{Bytes, LedgerEntry};

use crate::error::Error;

/// A single state entry as returned by `GET /state/{key}` and inside scan pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub key: String,
    pub value: String,
}

impl StateEntry {
    pub fn encode(key: impl Into<String>, value: &[u8]) -> Self {
        Self {
            key: key.into(),
            value: STANDARD.encode(value),
        }
    }

    pub fn into_ledger_entry(self) -> Result<LedgerEntry, Error> {
        let value = STANDARD
            .decode(&self.value)
            .map_err(|e| Error::InvalidValue {
                key: self.key.clone(),
                message: e.to_string(),
            })?;
        Ok(LedgerEntry {
            key: self.key,
            value: Bytes::from(value),
        })
    }
}

/// Request body for `PUT /state/{key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutState {
    pub value: String,
}

impl PutState {
    pub fn encode(value: &[u8]) -> Self {
        Self {
            value: STANDARD.encode(value),
        }
    }
}

/// One page of a range scan, as returned by `GET /state`.
///
/// A `bookmark` that is `None` or empty marks the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPage {
    #[serde(default)]
    pub entries: Vec<StateEntry>,
    #[serde(default)]
    pub bookmark: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_entry_decodes_value() {
        let entry = StateEntry::encode("12", b"{\"id\":\"12\"}");
        assert_eq!(entry.value, "eyJpZCI6IjEyIn0=");

        let decoded = entry.into_ledger_entry().unwrap();
        assert_eq!(decoded.key, "12");
        assert_eq!(decoded.value, Bytes::from_static(b"{\"id\":\"12\"}"));
    }

    #[test]
    fn state_entry_rejects_bad_base64() {
        let entry = StateEntry {
            key: "12".to_string(),
            value: "not base64!".to_string(),
        };
        assert!(matches!(
            entry.into_ledger_entry(),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn scan_page_defaults() {
        let page: ScanPage = serde_json::from_str("{}").unwrap();
        assert!(page.entries.is_empty());
        assert!(page.bookmark.is_none());
    }
}
