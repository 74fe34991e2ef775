//! File-backed setup status store
//!
//! Persists whether initial authentication setup has been completed as a
//! small JSON document in the application data directory. Writes go to a
//! sibling temp file first and are renamed into place, so a crash never
//! leaves a half-written record behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use vg_core::ports::SetupStatusPort;
use vg_core::setup::SetupStatus;

pub const DEFAULT_SETUP_STATUS_FILE: &str = "setup_status.json";

pub struct FileSetupStatusStore {
    status_file_path: PathBuf,
}

impl FileSetupStatusStore {
    pub fn new(status_file_path: PathBuf) -> Self {
        Self { status_file_path }
    }

    /// Store at `<data_dir>/setup_status.json`.
    pub fn with_defaults(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(DEFAULT_SETUP_STATUS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.status_file_path
    }

    /// Records that setup finished now.
    pub async fn mark_configured(&self) -> anyhow::Result<SetupStatus> {
        let status = SetupStatus::completed_at(Utc::now());
        self.set_status(&status).await?;
        info!(path = %self.status_file_path.display(), "setup marked as configured");
        Ok(status)
    }

    /// Forgets the setup record; the next launch routes to the setup flow.
    pub async fn reset(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.status_file_path).await {
            Ok(()) => {
                info!(path = %self.status_file_path.display(), "setup status reset");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).with_context(|| {
                format!(
                    "failed to remove setup status file {}",
                    self.status_file_path.display()
                )
            }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .status_file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_SETUP_STATUS_FILE.into());
        name.push(".tmp");
        self.status_file_path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.status_file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl SetupStatusPort for FileSetupStatusStore {
    async fn get_status(&self) -> anyhow::Result<SetupStatus> {
        let content = match fs::read_to_string(&self.status_file_path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.status_file_path.display(), "no setup status file yet");
                return Ok(SetupStatus::default());
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!(
                        "failed to read setup status file {}",
                        self.status_file_path.display()
                    )
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(SetupStatus::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse setup status: {e}"))
    }

    async fn set_status(&self, status: &SetupStatus) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(status)
            .map_err(|e| anyhow::anyhow!("failed to serialize setup status: {e}"))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .with_context(|| format!("failed to create {}", temp_path.display()))?;
        file.write_all(json.as_bytes())
            .await
            .context("failed to write setup status")?;
        file.sync_all()
            .await
            .context("failed to sync setup status")?;
        drop(file);

        fs::rename(&temp_path, &self.status_file_path)
            .await
            .with_context(|| {
                format!(
                    "failed to move setup status into {}",
                    self.status_file_path.display()
                )
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_means_not_configured() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSetupStatusStore::new(temp_dir.path().join("missing.json"));

        assert_eq!(store.get_status().await.unwrap(), SetupStatus::default());
        assert!(!store.is_configured().await.unwrap());
    }

    #[tokio::test]
    async fn set_status_then_get_status_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSetupStatusStore::new(temp_dir.path().join("nested/status.json"));

        let status = SetupStatus::completed_at(Utc::now());
        store.set_status(&status).await.unwrap();

        assert_eq!(store.get_status().await.unwrap(), status);
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn blank_file_means_not_configured() {
        let temp_dir = TempDir::new().unwrap();
        let status_file = temp_dir.path().join("blank.json");
        fs::write(&status_file, "  \n").await.unwrap();

        let store = FileSetupStatusStore::new(status_file);

        assert!(!store.is_configured().await.unwrap());
    }

    #[tokio::test]
    async fn invalid_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let status_file = temp_dir.path().join("invalid.json");
        fs::write(&status_file, "{invalid json").await.unwrap();

        let store = FileSetupStatusStore::new(status_file);
        let err = store.is_configured().await.unwrap_err();

        assert!(err.to_string().contains("failed to parse setup status"));
    }

    #[tokio::test]
    async fn mark_configured_then_reset() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSetupStatusStore::with_defaults(temp_dir.path());
        assert_eq!(store.path(), temp_dir.path().join(DEFAULT_SETUP_STATUS_FILE));

        let status = store.mark_configured().await.unwrap();
        assert!(status.completed_at.is_some());
        assert!(store.is_configured().await.unwrap());

        store.reset().await.unwrap();
        assert!(!store.path().exists());
        assert!(!store.is_configured().await.unwrap());

        // Resetting twice is fine.
        store.reset().await.unwrap();
    }
}
