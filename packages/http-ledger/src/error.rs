use carledger_ledger_store::{Bytes, LedgerError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for key {key:?}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<Error> for LedgerError {
    fn from(error: Error) -> Self {
        match error {
            Error::Status { status, body } => LedgerError::Protocol {
                code: u32::from(status),
                detail: Bytes::from(body),
            },
            other => LedgerError::Transport(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_becomes_protocol_error() {
        let err: LedgerError = Error::Status {
            status: 503,
            body: "peer unavailable".to_string(),
        }
        .into();

        match err {
            LedgerError::Protocol { code, detail } => {
                assert_eq!(code, 503);
                assert_eq!(detail, Bytes::from_static(b"peer unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_errors_become_transport() {
        let err: LedgerError = Error::InvalidUrl {
            message: "mailto:x".to_string(),
        }
        .into();
        assert!(matches!(err, LedgerError::Transport(_)));
        assert!(err.to_string().contains("mailto:x"));
    }
}
