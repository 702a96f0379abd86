use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::domain::{ports::ContentStorage, DomainError};

/// Filesystem-backed content storage. Keys are flat file names under the
/// configured root directory.
pub struct FsContentStorage {
    root: PathBuf,
}

impl FsContentStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        // Keys are generated by the service, but refuse traversal anyway.
        if key.is_empty() || key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(DomainError::storage(format!("malformed storage key: {}", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ContentStorage for FsContentStorage {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| DomainError::storage(e.to_string()))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        let path = self.path_for(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| DomainError::storage(format!("content {} unreadable: {}", key, e)))
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::storage(e.to_string())),
        }
    }
}

/// In-memory content storage for tests.
pub struct InMemoryContentStorage {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryContentStorage {
    pub fn new() -> Self {
        Self {
            blobs: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryContentStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStorage for InMemoryContentStorage {
    async fn put(&self, key: &str, content: &[u8]) -> Result<(), DomainError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        blobs.insert(key.to_string(), content.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        let blobs = self
            .blobs
            .read()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        blobs
            .get(key)
            .cloned()
            .ok_or_else(|| DomainError::storage(format!("content {} unreadable", key)))
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| DomainError::storage(e.to_string()))?;

        blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fs_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsContentStorage::new(dir.path());

        storage.put("doc.txt", b"hello").await.unwrap();
        assert_eq!(storage.get("doc.txt").await.unwrap(), b"hello");

        storage.delete("doc.txt").await.unwrap();
        assert!(storage.get("doc.txt").await.is_err());
    }

    #[tokio::test]
    async fn test_fs_storage_rejects_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FsContentStorage::new(dir.path());

        assert!(storage.put("../escape", b"x").await.is_err());
        assert!(storage.put("..", b"x").await.is_err());
        assert!(storage.get("a/b").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_storage_round_trip() {
        let storage = InMemoryContentStorage::new();
        storage.put("k", b"content").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), b"content");

        storage.delete("k").await.unwrap();
        assert!(storage.get("k").await.is_err());
    }
}
