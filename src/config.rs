//! Filesystem layout for the application. Everything lives in a single data
//! directory beneath the user's home so the database and log file stay side by
//! side; the database file name itself is fixed by the `db` module.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".name-record-manager";
/// Log file written next to the database.
const LOG_FILE_NAME: &str = "name-record-manager.log";
/// Environment variable that relocates the data directory.
pub const HOME_ENV: &str = "NAME_RECORD_MANAGER_HOME";

/// Resolved paths the binary needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    /// Resolve the data directory, preferring the environment override and
    /// falling back to `~/.name-record-manager`.
    pub fn resolve() -> Result<Self> {
        if let Some(dir) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::in_dir(dir));
        }

        let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::in_dir(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Build a configuration rooted at an explicit directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE_NAME)
    }
}
