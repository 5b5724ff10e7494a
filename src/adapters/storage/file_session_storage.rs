//! File-based Session Storage Adapter
//!
//! Stores the persisted session as a single JSON object of key to string
//! value. The file and its parent directory are created on first write.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::ports::{GatewayError, SessionStorage};

type Entries = BTreeMap<String, String>;

enum Contents {
    Entries(Entries),
    Malformed(String),
}

/// File-backed key-value storage for the persisted session
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Create a storage backed by the JSON file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileSessionStorage::new(".course-portal/session.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file. A missing or blank file is an empty map.
    async fn read_contents(&self) -> Result<Contents, GatewayError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Contents::Entries(Entries::new())),
            Err(e) => return Err(GatewayError::storage(e.to_string())),
        };

        if raw.trim().is_empty() {
            return Ok(Contents::Entries(Entries::new()));
        }

        Ok(match serde_json::from_str(&raw) {
            Ok(entries) => Contents::Entries(entries),
            Err(e) => Contents::Malformed(format!(
                "malformed session file {}: {}",
                self.path.display(),
                e
            )),
        })
    }

    async fn read_entries(&self) -> Result<Entries, GatewayError> {
        match self.read_contents().await? {
            Contents::Entries(entries) => Ok(entries),
            Contents::Malformed(reason) => Err(GatewayError::storage(reason)),
        }
    }

    /// Reads the file for modification. A malformed file is replaced.
    async fn read_entries_for_update(&self) -> Result<Entries, GatewayError> {
        match self.read_contents().await? {
            Contents::Entries(entries) => Ok(entries),
            Contents::Malformed(reason) => {
                tracing::warn!(%reason, "Overwriting malformed session file");
                Ok(Entries::new())
            }
        }
    }

    async fn write_entries(&self, entries: &Entries) -> Result<(), GatewayError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| GatewayError::storage(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| GatewayError::storage(e.to_string()))?;

        fs::write(&self.path, json)
            .await
            .map_err(|e| GatewayError::storage(e.to_string()))
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, GatewayError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), GatewayError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_update().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), GatewayError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_update().await?;
        if entries.remove(key).is_none() && fs::metadata(&self.path).await.is_err() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}
