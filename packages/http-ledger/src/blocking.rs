use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use url::Url;

use carledger_ledger_store::{Bytes, LedgerCursor, LedgerEntry, LedgerError, LedgerStore};

use crate::error::Error;
use crate::types::{PutState, ScanPage, StateEntry};

/// Entries requested per scan page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A ledger store backed by a remote ledger's HTTP API
///
/// This store maps ledger operations to HTTP requests:
/// - `get(key)` performs `GET {base}/state/{key}`; a 404 means the key is absent
/// - `put(key, value)` performs `PUT {base}/state/{key}`
/// - `scan_all()` pages through `GET {base}/state`, following bookmarks
///
/// # Example
///
/// ```ignore
/// use carledger_http::HttpLedgerStore;
/// use carledger_ledger_store::LedgerStore;
///
/// let mut store = HttpLedgerStore::new("https://peer0.example.com/ledger/")?
///     .with_default_header("Authorization", "Bearer token")
///     .with_page_size(50);
///
/// let bytes = store.get("12")?;
/// ```
pub struct HttpLedgerStore {
    client: Client,
    base_url: Url,
    default_headers: HashMap<String, String>,
    page_size: usize,
}

impl HttpLedgerStore {
    /// Create a new HTTP ledger store with the given base URL
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a new HTTP ledger store whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Create a new HTTP ledger store with a custom reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                message: format!("{} cannot be used as a base URL", base_url),
            });
        }

        Ok(Self {
            client,
            base_url,
            default_headers: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Add a default header that will be sent with every request
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// Set how many entries each scan page requests
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/state[/{key}]`, percent-encoding the key as one segment
    fn state_url(&self, key: Option<&str>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| Error::InvalidUrl {
                message: format!("{} cannot be used as a base URL", self.base_url),
            })?;
            segments.pop_if_empty().push("state");
            if let Some(key) = key {
                segments.push(key);
            }
        }
        Ok(url)
    }

    fn with_headers(&self, mut req_builder: RequestBuilder) -> RequestBuilder {
        for (name, value) in &self.default_headers {
            req_builder = req_builder.header(name, value);
        }
        req_builder
    }

    fn error_for_status(response: Response) -> Result<Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn fetch_state(&self, key: &str) -> Result<Option<Bytes>, Error> {
        let url = self.state_url(Some(key))?;
        tracing::debug!(%url, "GET ledger state");

        let response = self.with_headers(self.client.get(url)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let entry: StateEntry = Self::error_for_status(response)?.json()?;
        Ok(Some(entry.into_ledger_entry()?.value))
    }

    fn store_state(&self, key: &str, value: &[u8]) -> Result<(), Error> {
        let url = self.state_url(Some(key))?;
        tracing::debug!(%url, bytes = value.len(), "PUT ledger state");

        let response = self
            .with_headers(self.client.put(url))
            .json(&PutState::encode(value))
            .send()?;
        Self::error_for_status(response)?;
        Ok(())
    }

    fn fetch_page(&self, bookmark: Option<&str>) -> Result<ScanPage, Error> {
        let url = self.state_url(None)?;
        tracing::debug!(%url, ?bookmark, "GET ledger scan page");

        let mut query = vec![("page_size", self.page_size.to_string())];
        if let Some(bookmark) = bookmark {
            query.push(("bookmark", bookmark.to_string()));
        }

        let response = self
            .with_headers(self.client.get(url))
            .query(&query)
            .send()?;
        Ok(Self::error_for_status(response)?.json()?)
    }
}

impl LedgerStore for HttpLedgerStore {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError> {
        Ok(self.fetch_state(key)?)
    }

    fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        Ok(self.store_state(key, &value)?)
    }

    fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError> {
        // The first page is fetched eagerly so an unreachable ledger fails the
        // scan itself rather than the first `next_entry`.
        let first = self.fetch_page(None)?;
        let mut cursor = PagedCursor {
            store: &*self,
            buffer: VecDeque::new(),
            bookmark: None,
            pending_error: None,
            closed: false,
        };
        cursor.absorb(first, None);
        Ok(Box::new(cursor))
    }
}

/// Pages through a remote scan, fetching the next page once the buffer drains.
struct PagedCursor<'a> {
    store: &'a HttpLedgerStore,
    buffer: VecDeque<StateEntry>,
    bookmark: Option<String>,
    pending_error: Option<LedgerError>,
    closed: bool,
}

impl PagedCursor<'_> {
    /// Buffer a page and keep its bookmark only if it points somewhere new.
    /// An empty bookmark, or the one just sent, ends the scan.
    fn absorb(&mut self, page: ScanPage, sent: Option<&str>) {
        self.buffer.extend(page.entries);
        self.bookmark = page
            .bookmark
            .filter(|next| !next.is_empty() && Some(next.as_str()) != sent);
    }

    /// Fetch pages until there is something buffered or the scan is over.
    /// A failed fetch is parked so the next `next_entry` reports it.
    fn fill(&mut self) {
        while self.buffer.is_empty() && self.pending_error.is_none() {
            let Some(bookmark) = self.bookmark.take() else {
                return;
            };
            match self.store.fetch_page(Some(&bookmark)) {
                Ok(page) => self.absorb(page, Some(&bookmark)),
                Err(error) => self.pending_error = Some(error.into()),
            }
        }
    }
}

impl LedgerCursor for PagedCursor<'_> {
    fn has_next(&mut self) -> bool {
        if self.closed {
            return false;
        }
        self.fill();
        !self.buffer.is_empty() || self.pending_error.is_some()
    }

    fn next_entry(&mut self) -> Result<LedgerEntry, LedgerError> {
        if self.closed {
            return Err(LedgerError::CursorClosed);
        }
        self.fill();
        if let Some(error) = self.pending_error.take() {
            return Err(error);
        }
        let entry = self.buffer.pop_front().ok_or(LedgerError::CursorExhausted)?;
        Ok(entry.into_ledger_entry()?)
    }

    fn close(&mut self) -> Result<(), LedgerError> {
        self.closed = true;
        self.buffer.clear();
        self.bookmark = None;
        self.pending_error = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_url_building() {
        let store = HttpLedgerStore::new("https://ledger.example.com/v1/").unwrap();
        let url = store.state_url(Some("12")).unwrap();
        assert_eq!(url.as_str(), "https://ledger.example.com/v1/state/12");
    }

    #[test]
    fn test_state_url_no_trailing_slash() {
        let store = HttpLedgerStore::new("https://ledger.example.com/v1").unwrap();
        let url = store.state_url(None).unwrap();
        assert_eq!(url.as_str(), "https://ledger.example.com/v1/state");
    }

    #[test]
    fn test_state_url_encodes_key() {
        let store = HttpLedgerStore::new("https://ledger.example.com").unwrap();
        let url = store.state_url(Some("a/b c")).unwrap();
        assert_eq!(url.as_str(), "https://ledger.example.com/state/a%2Fb%20c");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            HttpLedgerStore::new("mailto:ledger@example.com"),
            Err(Error::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_default_headers() {
        let store = HttpLedgerStore::new("https://ledger.example.com")
            .unwrap()
            .with_default_header("Authorization", "Bearer token123")
            .with_default_header("X-Channel", "cars");

        assert_eq!(store.default_headers.len(), 2);
        assert_eq!(
            store.default_headers.get("Authorization"),
            Some(&"Bearer token123".to_string())
        );
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        let store = HttpLedgerStore::new("https://ledger.example.com")
            .unwrap()
            .with_page_size(0);
        assert_eq!(store.page_size, 1);
    }
}
