use std::{fs, io, path};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use carledger_ledger_store::{Bytes, LedgerCursor, LedgerEntry, LedgerError, LedgerStore};

const EXTENSION: &str = "json";

/// A ledger persisted as one file per key under a root directory.
///
/// File names are the URL-safe base64 of the key plus `.json`, so any key maps
/// to a valid name. Values are written to a `.tmp` staging file and renamed
/// into place, so readers never observe a half-written record. Files that do
/// not decode to a key are ignored by scans.
#[derive(Debug)]
pub struct JsonFileLedger {
    root: path::PathBuf,
}

impl JsonFileLedger {
    pub fn new(root: path::PathBuf) -> Result<JsonFileLedger, LedgerError> {
        let attr = fs::metadata(&root).map_err(|error| {
            LedgerError::transport(format!(
                "ledger root ({}) is invalid: {}",
                root.display(),
                error
            ))
        })?;

        if !attr.is_dir() {
            return Err(LedgerError::transport(format!(
                "ledger root ({}) must be a directory",
                root.display()
            )));
        }

        if attr.permissions().readonly() {
            return Err(LedgerError::transport(format!(
                "ledger root ({}) must be writable",
                root.display()
            )));
        }

        Ok(JsonFileLedger {
            root: root.canonicalize()?,
        })
    }

    /// Open a ledger rooted at `root`, creating the directory if needed.
    pub fn create(root: path::PathBuf) -> Result<JsonFileLedger, LedgerError> {
        fs::create_dir_all(&root)?;
        Self::new(root)
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    fn key_to_file_path(&self, key: &str) -> path::PathBuf {
        self.root
            .join(format!("{}.{}", URL_SAFE_NO_PAD.encode(key), EXTENSION))
    }

    fn file_name_to_key(name: &str) -> Option<String> {
        let encoded = name.strip_suffix(EXTENSION)?.strip_suffix('.')?;
        let raw = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        String::from_utf8(raw).ok()
    }

    fn read_file(file_path: &path::Path) -> Result<Option<Bytes>, LedgerError> {
        match fs::read(file_path) {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

impl LedgerStore for JsonFileLedger {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError> {
        let file_path = self.key_to_file_path(key);
        tracing::debug!("Reading {}...", file_path.display());
        Self::read_file(&file_path)
    }

    fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError> {
        let file_path = self.key_to_file_path(key);
        tracing::debug!("Writing {}...", file_path.display());

        let file_name = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| LedgerError::transport("ledger file name is not valid UTF-8"))?;
        let staging_path = self.root.join(format!(".{}.tmp", file_name));

        fs::write(&staging_path, &value)?;
        fs::rename(&staging_path, &file_path)?;
        Ok(())
    }

    fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError> {
        tracing::debug!("Scanning {}...", self.root.display());

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            match Self::file_name_to_key(name) {
                Some(key) => files.push((key, entry.path())),
                None => tracing::debug!("Skipping foreign file {}", name),
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Box::new(FileCursor {
            files: files.into_iter(),
            closed: false,
        }))
    }
}

/// Reads each file only when its entry is requested.
struct FileCursor {
    files: std::vec::IntoIter<(String, path::PathBuf)>,
    closed: bool,
}

impl LedgerCursor for FileCursor {
    fn has_next(&mut self) -> bool {
        !self.closed && !self.files.as_slice().is_empty()
    }

    fn next_entry(&mut self) -> Result<LedgerEntry, LedgerError> {
        if self.closed {
            return Err(LedgerError::CursorClosed);
        }
        let (key, file_path) = self.files.next().ok_or(LedgerError::CursorExhausted)?;
        let value = Self::read_listed(&file_path)?;
        Ok(LedgerEntry { key, value })
    }

    fn close(&mut self) -> Result<(), LedgerError> {
        self.closed = true;
        self.files = Vec::new().into_iter();
        Ok(())
    }
}

impl FileCursor {
    fn read_listed(file_path: &path::Path) -> Result<Bytes, LedgerError> {
        JsonFileLedger::read_file(file_path)?.ok_or_else(|| {
            LedgerError::transport(format!(
                "ledger file {} disappeared during scan",
                file_path.display()
            ))
        })
    }
}

#[cfg(test)]
mod json_file_ledger_tests {
    use super::*;
    use carledger_ledger_store::{trait_test_suite, ScopedCursor};

    struct TestJsonFileLedger {
        // Having this as a member allows the directory to be cleaned up once the test store is
        // dropped.
        _dir: tempfile::TempDir,
        store: JsonFileLedger,
    }

    impl TestJsonFileLedger {
        fn new() -> TestJsonFileLedger {
            let dir = tempfile::tempdir().unwrap();
            let dir_path = path::PathBuf::from(dir.path());
            TestJsonFileLedger {
                _dir: dir,
                store: JsonFileLedger::new(dir_path).unwrap(),
            }
        }
    }

    impl LedgerStore for TestJsonFileLedger {
        fn get(&mut self, key: &str) -> Result<Option<Bytes>, LedgerError> {
            self.store.get(key)
        }

        fn put(&mut self, key: &str, value: Bytes) -> Result<(), LedgerError> {
            self.store.put(key, value)
        }

        fn scan_all(&mut self) -> Result<Box<dyn LedgerCursor + '_>, LedgerError> {
            self.store.scan_all()
        }
    }

    #[test]
    fn conforms_to_ledger_contract() {
        trait_test_suite::run_all(TestJsonFileLedger::new);
    }

    #[test]
    fn file_names_round_trip_keys() {
        for key in ["12", "a/b", "", "car with spaces", "ключ"] {
            let name = format!("{}.json", URL_SAFE_NO_PAD.encode(key));
            assert_eq!(JsonFileLedger::file_name_to_key(&name).as_deref(), Some(key));
        }
        assert_eq!(JsonFileLedger::file_name_to_key("notes.txt"), None);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = JsonFileLedger::new(dir.path().to_path_buf()).unwrap();
            store.put("12", Bytes::from_static(b"{\"id\":\"12\"}")).unwrap();
        }

        let mut store = JsonFileLedger::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(
            store.get("12").unwrap(),
            Some(Bytes::from_static(b"{\"id\":\"12\"}"))
        );
    }

    #[test]
    fn scan_skips_staging_and_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileLedger::new(dir.path().to_path_buf()).unwrap();

        store.put("12", Bytes::from_static(b"1")).unwrap();
        fs::write(dir.path().join(".leftover.tmp"), b"junk").unwrap();
        fs::write(dir.path().join("README"), b"junk").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let mut cursor = ScopedCursor::new(store.scan_all().unwrap());
        let keys: Vec<String> = cursor.by_ref().map(|e| e.unwrap().key).collect();
        cursor.finish().unwrap();

        assert_eq!(keys, vec!["12"]);
    }

    #[test]
    fn create_makes_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("ledger");

        let store = JsonFileLedger::create(root.clone()).unwrap();
        assert!(root.is_dir());
        assert_eq!(store.root(), root.canonicalize().unwrap());
    }

    #[test]
    fn rejects_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("ledger");
        fs::write(&file_path, b"").unwrap();

        assert!(JsonFileLedger::new(file_path).is_err());
    }
}
