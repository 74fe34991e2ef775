use std::path::PathBuf;

use thiserror::Error;

const APP_DIR_NAME: &str = "vaultgate";

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("platform has no local data directory")]
    DataLocalDirUnavailable,
}

/// Directories and well-known files under the application data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join("logs")
    }

    pub fn config_file(&self) -> PathBuf {
        self.app_data_root.join("config.toml")
    }
}

fn resolved_app_dir_name() -> String {
    match std::env::var("VAULTGATE_PROFILE") {
        Ok(profile) if !profile.is_empty() => format!("{APP_DIR_NAME}-{profile}"),
        _ => APP_DIR_NAME.to_string(),
    }
}

pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self {
            base_data_local_dir_override: None,
        }
    }

    /// Uses `base` instead of the platform data-local directory.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    fn base_data_local_dir(&self) -> Option<PathBuf> {
        if let Some(base) = &self.base_data_local_dir_override {
            return Some(base.clone());
        }
        dirs::data_local_dir()
    }

    pub fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base_data = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base_data.join(resolved_app_dir_name()),
        })
    }
}

impl Default for DirsAppDirsAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static PROFILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_profile<T>(value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let _guard = PROFILE_ENV_LOCK.lock().unwrap();
        let previous = std::env::var("VAULTGATE_PROFILE").ok();

        match value {
            Some(profile) => std::env::set_var("VAULTGATE_PROFILE", profile),
            None => std::env::remove_var("VAULTGATE_PROFILE"),
        }

        let result = f();

        match previous {
            Some(profile) => std::env::set_var("VAULTGATE_PROFILE", profile),
            None => std::env::remove_var("VAULTGATE_PROFILE"),
        }

        result
    }

    #[test]
    fn app_dirs_join_app_name_under_base() {
        let dirs = with_profile(None, || {
            DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp/base"))
                .get_app_dirs()
                .unwrap()
        });

        assert_eq!(dirs.app_data_root, PathBuf::from("/tmp/base/vaultgate"));
        assert_eq!(dirs.logs_dir(), PathBuf::from("/tmp/base/vaultgate/logs"));
        assert_eq!(
            dirs.config_file(),
            PathBuf::from("/tmp/base/vaultgate/config.toml")
        );
    }

    #[test]
    fn profile_suffixes_the_app_dir() {
        let dirs = with_profile(Some("dev"), || {
            DirsAppDirsAdapter::with_base_data_local_dir(PathBuf::from("/tmp/base"))
                .get_app_dirs()
                .unwrap()
        });

        assert_eq!(dirs.app_data_root, PathBuf::from("/tmp/base/vaultgate-dev"));
    }
}
