//! Path management for fundview
//!
//! ## Path Resolution Order
//!
//! 1. `FUNDVIEW_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/fundview` on Linux, `~/Library/Application Support/fundview`
//!    on macOS, `%APPDATA%\fundview\config` on Windows)

use directories::ProjectDirs;
use std::path::{Path, PathBuf};

use crate::error::FundviewError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "FUNDVIEW_CONFIG_DIR";

/// Manages the paths used by fundview
#[derive(Debug, Clone)]
pub struct FundviewPaths {
    base_dir: PathBuf,
}

impl FundviewPaths {
    /// Resolve paths from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FundviewError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Create the config directory if it is missing
    pub fn ensure_directories(&self) -> Result<(), FundviewError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            FundviewError::Io(format!("Failed to create config directory: {}", e))
        })
    }
}

fn resolve_default_path() -> Result<PathBuf, FundviewError> {
    ProjectDirs::from("", "", "fundview")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FundviewError::Config("Could not determine home directory".into()))
}
