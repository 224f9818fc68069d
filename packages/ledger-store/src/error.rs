//! Error types for the ledger layer.
//!
//! Errors at this level are transport-focused. Nothing here knows about cars,
//! owners or transfer limits - those belong in the registry.

use bytes::Bytes;

/// Errors raised by a ledger store or one of its cursors.
#[derive(Debug)]
pub enum LedgerError {
    /// Generic I/O or transport failure.
    ///
    /// Use this for network errors, file I/O errors, IPC failures, etc.
    Transport(Box<dyn std::error::Error + Send + Sync>),

    /// The cursor was used after it had been closed.
    CursorClosed,

    /// `next_entry` was called on a cursor with no remaining entries.
    CursorExhausted,

    /// Protocol-specific error with a numeric code.
    ///
    /// The code and detail are opaque to this layer. Remote ledgers use it to
    /// carry a status code and the response body.
    Protocol {
        /// Protocol-specific error code.
        code: u32,
        /// Optional detail bytes (error message, structured error, etc.)
        detail: Bytes,
    },
}

impl LedgerError {
    /// Wrap any error as a transport failure.
    pub fn transport<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        LedgerError::Transport(error.into())
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::Transport(e) => write!(f, "transport error: {}", e),
            LedgerError::CursorClosed => write!(f, "cursor already closed"),
            LedgerError::CursorExhausted => write!(f, "cursor has no more entries"),
            LedgerError::Protocol { code, detail } => {
                if detail.is_empty() {
                    write!(f, "protocol error: code {}", code)
                } else {
                    // Try to display detail as UTF-8, fall back to debug bytes
                    match std::str::from_utf8(detail) {
                        Ok(s) => write!(f, "protocol error: code {} - {}", code, s),
                        Err(_) => write!(f, "protocol error: code {} - {:?}", code, detail),
                    }
                }
            }
        }
    }
}

impl std::error::Error for LedgerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedgerError::Transport(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        LedgerError::Transport(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display_works() {
        let e = LedgerError::CursorClosed;
        assert_eq!(format!("{}", e), "cursor already closed");

        let e = LedgerError::Protocol {
            code: 503,
            detail: Bytes::from_static(b"peer unavailable"),
        };
        assert!(format!("{}", e).contains("503"));
        assert!(format!("{}", e).contains("peer unavailable"));
    }

    #[test]
    fn protocol_without_detail() {
        let e = LedgerError::Protocol {
            code: 500,
            detail: Bytes::new(),
        };
        assert_eq!(format!("{}", e), "protocol error: code 500");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only");
        let err: LedgerError = io_err.into();
        assert!(matches!(err, LedgerError::Transport(_)));
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn transport_from_string() {
        let err = LedgerError::transport("connection reset");
        assert_eq!(format!("{}", err), "transport error: connection reset");
    }
}
