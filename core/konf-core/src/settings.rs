//! Runtime settings.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. `~/.config/konf/config.toml`, if present
//! 3. `KONF_DIR` / `KONF_SILENT` environment variables
//! 4. command-line flags, applied by the binary
//!
//! ```toml
//! konf_dir = "/home/me/.kube/konfs"
//! silent = false
//! ```

use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::Deserialize;

use crate::error::{KonfError, Result};
use crate::storage::StorageConfig;

const DEFAULT_SETTINGS_RELATIVE_PATH: &str = ".config/konf/config.toml";

pub const KONF_DIR_ENV: &str = "KONF_DIR";
pub const KONF_SILENT_ENV: &str = "KONF_SILENT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root of store, active markers and latest pointer. `~/.kube/konfs` if unset.
    pub konf_dir: Option<PathBuf>,
    /// Suppress all log output.
    pub silent: bool,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(KonfError::HomeDirNotFound)?;
        Ok(home.join(DEFAULT_SETTINGS_RELATIVE_PATH))
    }

    /// Loads settings from `path`, or from [`Settings::default_path`].
    ///
    /// A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|err| KonfError::Settings {
            path,
            details: err.to_string(),
        })
    }

    /// Overlays values from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlays values from `lookup`, which maps a variable name to its value.
    pub fn apply_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(KONF_DIR_ENV).filter(|value| !value.is_empty()) {
            self.konf_dir = Some(PathBuf::from(dir));
        }
        if let Some(silent) = lookup(KONF_SILENT_ENV) {
            self.silent = is_truthy(&silent);
        }
        self
    }

    /// Resolves the storage layout these settings describe.
    pub fn storage(&self) -> Result<StorageConfig> {
        match &self.konf_dir {
            Some(dir) => Ok(StorageConfig::with_root(dir.clone())),
            None => StorageConfig::from_home(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
