use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::config::AppConfig;
use crate::declare_object_storage_plugin;
use crate::errors::{ExamAdminError, Result};
use crate::object_storage::{ObjectStorage, StoredObject, is_safe_key};

declare_object_storage_plugin!("local", LocalObjectStorage);

/// 本地文件系统存储，文件经 `GET /uploads/{key}` 回读
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new() -> std::result::Result<Self, String> {
        let config = &AppConfig::get().object_storage;
        std::fs::create_dir_all(&config.local_dir)
            .map_err(|e| format!("Failed to create {}: {e}", config.local_dir))?;
        Ok(Self::with_root(&config.local_dir, &config.public_base_url))
    }

    pub fn with_root(root: impl AsRef<Path>, public_base_url: &str) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_safe_key(key) {
            return Err(ExamAdminError::validation(format!("Invalid object key: {key}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<StoredObject> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored {} ({} bytes, {})", key, bytes.len(), content_type);

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
            size: bytes.len(),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::temp_root;

    #[tokio::test]
    async fn test_put_get_delete() {
        let root = temp_root("local");
        let storage = LocalObjectStorage::with_root(&root, "/uploads/");

        let stored = storage
            .put("media/1-banner.png", b"\x89PNG\r\n\x1a\nrest", "image/png")
            .await
            .unwrap();
        assert_eq!(stored.url, "/uploads/media/1-banner.png");
        assert_eq!(stored.size, 12);

        let bytes = storage.get("media/1-banner.png").await.unwrap().unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");

        assert!(storage.delete("media/1-banner.png").await.unwrap());
        assert!(!storage.delete("media/1-banner.png").await.unwrap());
        assert!(storage.get("media/1-banner.png").await.unwrap().is_none());

        std::fs::remove_dir_all(root).ok();
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let root = temp_root("traversal");
        let storage = LocalObjectStorage::with_root(&root, "/uploads");
        let err = storage.put("../escape.txt", b"x", "text/plain").await.unwrap_err();
        assert!(matches!(err, ExamAdminError::Validation(_)));
        std::fs::remove_dir_all(root).ok();
    }
}
