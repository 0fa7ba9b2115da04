//! On-disk token cache with atomic overwrite
//!
//! The store is shared, mutable, single-writer state: concurrent processes are
//! not coordinated here. Callers needing multi-process safety must add their
//! own locking.

use std::io;
use std::path::{Path, PathBuf};

use crate::credential::Credential;
use crate::error::{Result, SheetsError};

/// Serialized credential blob at a caller-supplied path
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_error(&self, message: String) -> SheetsError {
        SheetsError::StoreRead {
            path: self.path.clone(),
            message,
        }
    }

    fn write_error(&self, message: String) -> SheetsError {
        SheetsError::StoreWrite {
            path: self.path.clone(),
            message,
        }
    }

    /// Load the persisted credential, `None` when the store does not exist
    ///
    /// A store that exists but cannot be read or parsed is a `StoreRead`
    /// failure, distinct from a missing or expired credential.
    pub async fn load(&self) -> Result<Option<Credential>> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no token cache at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(self.read_error(e.to_string())),
        };

        let credential: Credential =
            serde_json::from_str(&json).map_err(|e| self.read_error(e.to_string()))?;

        tracing::debug!("loaded credential from {:?}", self.path);
        Ok(Some(credential))
    }

    /// Persist a credential, replacing any previous content
    ///
    /// Writes a sibling temp file and renames it over the target, so a crash
    /// mid-write leaves the previous store content intact.
    pub async fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.write_error(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(credential)?;
        let tmp_path = self.tmp_path();

        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| self.write_error(e.to_string()))?;

        #[cfg(unix)]
        self.restrict_permissions(&tmp_path).await?;

        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.write_error(e.to_string()))?;

        tracing::debug!("persisted credential to {:?}", self.path);
        Ok(())
    }

    // same directory as the target so the rename stays on one filesystem
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Tokens are secrets: 0600, owner only
    #[cfg(unix)]
    async fn restrict_permissions(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = tokio::fs::metadata(path)
            .await
            .map_err(|e| self.write_error(e.to_string()))?
            .permissions();
        perms.set_mode(0o600);
        tokio::fs::set_permissions(path, perms)
            .await
            .map_err(|e| self.write_error(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn sample_credential() -> Credential {
        Credential {
            access_token: "ya29.sample".to_string(),
            refresh_token: Some("1//refresh".to_string()),
            expiry: Some(Utc::now() + Duration::hours(1)),
            scopes: vec!["https://www.googleapis.com/auth/spreadsheets".to_string()],
        }
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TokenStore::new(temp_dir.path().join("token.json"));

        let credential = sample_credential();
        store.save(&credential).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, credential);
    }

    #[tokio::test]
    async fn test_load_missing_store_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = TokenStore::new(temp_dir.path().join("missing.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_store_is_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        tokio::fs::write(&path, "not json {").await.unwrap();

        let store = TokenStore::new(&path);
        let result = store.load().await;
        assert!(matches!(result, Err(SheetsError::StoreRead { .. })));
    }

    #[tokio::test]
    async fn test_load_unreadable_store_is_read_error() {
        // a directory at the store path fails the read, not the exists-check
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        tokio::fs::create_dir(&path).await.unwrap();

        let store = TokenStore::new(&path);
        let result = store.load().await;
        assert!(matches!(result, Err(SheetsError::StoreRead { .. })));
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("cache").join("token.json");

        let store = TokenStore::new(&path);
        store.save(&sample_credential()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let store = TokenStore::new(temp_dir.path().join("token.json"));

        let first = sample_credential();
        store.save(&first).await.unwrap();

        let mut second = sample_credential();
        second.access_token = "ya29.newer".to_string();
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "ya29.newer");
    }

    #[tokio::test]
    async fn test_interrupted_write_leaves_previous_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");

        let store = TokenStore::new(&path);
        let original = sample_credential();
        store.save(&original).await.unwrap();

        // simulate a crash between the temp write and the rename: a stray
        // temp file exists but the target was never replaced
        let stray = temp_dir.path().join("token.json.tmp");
        tokio::fs::write(&stray, "partial garbag").await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, original);
    }

    #[tokio::test]
    async fn test_no_temp_file_left_after_save() {
        let temp_dir = TempDir::new().unwrap();
        let store = TokenStore::new(temp_dir.path().join("token.json"));
        store.save(&sample_credential()).await.unwrap();

        assert!(!temp_dir.path().join("token.json.tmp").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_saved_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token.json");
        let store = TokenStore::new(&path);
        store.save(&sample_credential()).await.unwrap();

        let perms = tokio::fs::metadata(&path).await.unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
