use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tasklist_core::{KeyValueStore, StorageError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Key-value store backed by one JSON object file.
///
/// Every `set` rewrites the whole file through a temp file in the same
/// directory, so readers never see a partial write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .map_err(|err| StorageError::Read(format!("{}: {err}", self.path.display())))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let serialized = serde_json::to_string_pretty(map)
            .map_err(|err| StorageError::Write(err.to_string()))?;
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(serialized.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path).map_err(|err| {
            StorageError::Write(format!("failed to persist {}: {}", self.path.display(), err))
        })?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    #[tracing::instrument(skip(self), fields(file = %self.path.display()))]
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut map = self.read_map()?;
        debug!(entries = map.len(), "read store file");
        Ok(map.remove(key))
    }

    #[tracing::instrument(skip(self, value), fields(file = %self.path.display()))]
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }
}
