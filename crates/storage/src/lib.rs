//! Object storage collaborator for product media.
//!
//! The catalog only needs two operations: put bytes under a key and get a
//! public URL back, and delete a key again when a write pipeline fails
//! after some uploads succeeded. The trait keeps the backend swappable;
//! the shipped implementation writes to a local directory served as
//! static files.

use std::path::PathBuf;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("I/O error for key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Blob store accepting uploads and handing back public URLs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` under `key` and return the public URL it will be
    /// served from. Keys never overwrite: callers generate fresh keys per
    /// upload.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str)
        -> Result<String, StorageError>;

    /// Remove a previously stored key. Missing keys are not an error;
    /// cleanup after a failed write pipeline must be idempotent.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Local-filesystem implementation: keys become paths under `root`, URLs
/// are `{public_base_url}/{key}`.
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a key to a path under the root, rejecting traversal.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty()
            || key.starts_with('/')
            || key.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io {
                    key: key.to_string(),
                    source,
                })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Io {
                key: key.to_string(),
                source,
            })?;
        tracing::debug!(key, size = bytes.len(), "Stored object");
        Ok(format!("{}/{key}", self.public_base_url))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStorage::new(dir.path(), "http://localhost:9000/media/");

        let url = store
            .put("toplight/main/beacon/1-ab.png", b"png-bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:9000/media/toplight/main/beacon/1-ab.png");
        let written = std::fs::read(dir.path().join("toplight/main/beacon/1-ab.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStorage::new(dir.path(), "http://x");

        store.put("a/b/c.png", b"1", "image/png").await.unwrap();
        store.delete("a/b/c.png").await.unwrap();
        // Second delete of a missing key succeeds.
        store.delete("a/b/c.png").await.unwrap();
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStorage::new(dir.path(), "http://x");

        assert!(store.put("../evil.png", b"1", "image/png").await.is_err());
        assert!(store.put("/abs.png", b"1", "image/png").await.is_err());
        assert!(store.put("", b"1", "image/png").await.is_err());
    }
}
