//! Binary asset storage for template images, design previews and editor
//! uploads.
//!
//! Assets are addressed by a key `{prefix}{filename}` where the prefix
//! separates unrelated entity kinds. Keys are opaque to callers; the store
//! decides the final key when it resolves a filename collision.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::CoreError;
use crate::naming::split_extension;

/// Key prefix for template base images.
pub const PREFIX_TEMPLATES: &str = "templates/";

/// Key prefix for saved design previews.
pub const PREFIX_SAVED_DESIGNS: &str = "saved_designs/";

/// Key prefix for images uploaded into the editor's asset pool.
pub const PREFIX_USER_IMAGES: &str = "user_images/";

/// Attempts made to find a free filename before giving up.
const MAX_COLLISION_ATTEMPTS: u32 = 100;

/// Storage backend for binary assets.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `bytes` as `{prefix}{filename}`, never overwriting an existing
    /// asset. Returns the key actually used.
    async fn put(&self, prefix: &str, filename: &str, bytes: &[u8]) -> Result<String, CoreError>;

    /// Remove an asset. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CoreError>;

    async fn exists(&self, key: &str) -> Result<bool, CoreError>;

    /// Public URL for an asset key.
    fn url(&self, key: &str) -> String;

    /// Confirm the backend currently accepts writes.
    async fn check_writable(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// Yield `name`, then `stem_1.ext`, `stem_2.ext`, ...
fn candidate_names(filename: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, ext) = split_extension(filename);
    std::iter::once(filename.to_string()).chain((1..MAX_COLLISION_ATTEMPTS).map(move |n| {
        match ext {
            Some(ext) => format!("{stem}_{n}.{ext}"),
            None => format!("{stem}_{n}"),
        }
    }))
}

fn validate_filename(filename: &str) -> Result<(), CoreError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.starts_with('.')
    {
        return Err(CoreError::Internal(format!(
            "Refusing to store asset with unsafe filename '{filename}'"
        )));
    }
    Ok(())
}

fn join_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

// ---------------------------------------------------------------------------
// Local filesystem
// ---------------------------------------------------------------------------

/// Stores assets as files below a media root directory.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    base_url: String,
}

impl LocalAssetStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        if key.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(CoreError::Internal(format!("Invalid asset key '{key}'")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put(&self, prefix: &str, filename: &str, bytes: &[u8]) -> Result<String, CoreError> {
        validate_filename(filename)?;

        let dir = self.root.join(prefix.trim_end_matches('/'));
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            CoreError::Internal(format!("Failed to create asset directory {}: {e}", dir.display()))
        })?;

        for candidate in candidate_names(filename) {
            let path = dir.join(&candidate);
            let opened = tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await;

            let mut file = match opened {
                Ok(file) => file,
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(CoreError::Internal(format!(
                        "Failed to create asset {}: {e}",
                        path.display()
                    )))
                }
            };

            let written = async {
                file.write_all(bytes).await?;
                file.sync_all().await
            }
            .await;

            if let Err(e) = written {
                // Do not leave a truncated file behind under a claimed name.
                let _ = tokio::fs::remove_file(&path).await;
                return Err(CoreError::Internal(format!(
                    "Failed to write asset {}: {e}",
                    path.display()
                )));
            }

            let key = format!("{prefix}{candidate}");
            tracing::debug!(asset_key = %key, size = bytes.len(), "Asset stored");
            return Ok(key);
        }

        Err(CoreError::Internal(format!(
            "No free asset name for '{filename}' after {MAX_COLLISION_ATTEMPTS} attempts"
        )))
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::Internal(format!(
                "Failed to delete asset {}: {e}",
                path.display()
            ))),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, CoreError> {
        let path = self.path_for(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to stat asset {}: {e}", path.display())))
    }

    fn url(&self, key: &str) -> String {
        join_url(&self.base_url, key)
    }

    async fn check_writable(&self) -> Result<(), CoreError> {
        let unwritable = |e: std::io::Error| {
            CoreError::Internal(format!(
                "Media root {} is not writable: {e}",
                self.root.display()
            ))
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(unwritable)?;
        let marker = self
            .root
            .join(format!(".write-check-{}", uuid::Uuid::new_v4().simple()));
        tokio::fs::write(&marker, b"").await.map_err(unwritable)?;
        tokio::fs::remove_file(&marker).await.map_err(unwritable)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Keeps assets in a map. Intended for tests and local experiments.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().get(key).cloned()
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn put(&self, prefix: &str, filename: &str, bytes: &[u8]) -> Result<String, CoreError> {
        validate_filename(filename)?;
        let mut data = self.lock();
        for candidate in candidate_names(filename) {
            let key = format!("{prefix}{candidate}");
            if !data.contains_key(&key) {
                data.insert(key.clone(), bytes.to_vec());
                return Ok(key);
            }
        }
        Err(CoreError::Internal(format!(
            "No free asset name for '{filename}' after {MAX_COLLISION_ATTEMPTS} attempts"
        )))
    }

    async fn delete(&self, key: &str) -> Result<(), CoreError> {
        self.lock().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, CoreError> {
        Ok(self.lock().contains_key(key))
    }

    fn url(&self, key: &str) -> String {
        join_url("/media", key)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn candidate_names_append_counter_before_extension() {
        let names: Vec<String> = candidate_names("card.png").take(3).collect();
        assert_eq!(names, vec!["card.png", "card_1.png", "card_2.png"]);
    }

    #[test]
    fn candidate_names_without_extension() {
        let names: Vec<String> = candidate_names("card").take(2).collect();
        assert_eq!(names, vec!["card", "card_1"]);
    }

    #[tokio::test]
    async fn local_store_writes_under_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path(), "/media/");

        let key = store
            .put(PREFIX_SAVED_DESIGNS, "card.png", b"hello")
            .await
            .unwrap();
        assert_eq!(key, "saved_designs/card.png");
        assert!(store.exists(&key).await.unwrap());

        let on_disk = tokio::fs::read(dir.path().join("saved_designs/card.png"))
            .await
            .unwrap();
        assert_eq!(on_disk, b"hello");
        assert_eq!(store.url(&key), "/media/saved_designs/card.png");
    }

    #[tokio::test]
    async fn local_store_resolves_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path(), "/media");

        let first = store.put(PREFIX_TEMPLATES, "a.png", b"1").await.unwrap();
        let second = store.put(PREFIX_TEMPLATES, "a.png", b"2").await.unwrap();
        assert_eq!(first, "templates/a.png");
        assert_eq!(second, "templates/a_1.png");

        let original = tokio::fs::read(dir.path().join("templates/a.png"))
            .await
            .unwrap();
        assert_eq!(original, b"1");
    }

    #[tokio::test]
    async fn local_store_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path(), "/media");

        let key = store.put(PREFIX_USER_IMAGES, "u.png", b"x").await.unwrap();
        store.delete(&key).await.unwrap();
        assert!(!store.exists(&key).await.unwrap());
        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    async fn local_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path(), "/media");

        assert_matches!(
            store.put(PREFIX_USER_IMAGES, "../escape.png", b"x").await,
            Err(CoreError::Internal(_))
        );
        assert_matches!(
            store.exists("user_images/../../etc").await,
            Err(CoreError::Internal(_))
        );
    }

    #[tokio::test]
    async fn local_store_write_check() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalAssetStore::new(dir.path().join("media"), "/media");
        store.check_writable().await.unwrap();
        // The marker file is cleaned up again.
        let mut entries = tokio::fs::read_dir(dir.path().join("media")).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());

        let file = dir.path().join("plain-file");
        tokio::fs::write(&file, b"x").await.unwrap();
        let store = LocalAssetStore::new(&file, "/media");
        assert_matches!(store.check_writable().await, Err(CoreError::Internal(_)));
    }

    #[tokio::test]
    async fn memory_store_resolves_collisions() {
        let store = MemoryAssetStore::new();
        let a = store.put(PREFIX_USER_IMAGES, "x.jpg", b"1").await.unwrap();
        let b = store.put(PREFIX_USER_IMAGES, "x.jpg", b"2").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(store.get(&a).unwrap(), b"1");
        assert_eq!(store.get(&b).unwrap(), b"2");
        assert_eq!(store.keys().len(), 2);
    }
}
