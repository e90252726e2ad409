//! Storage configuration and path management for konf.
//!
//! `StorageConfig` is the single source of truth for every path konf touches.
//! It is passed explicitly into [`crate::KonfStore`] and
//! [`crate::SessionManager`]; nothing reads paths from process-wide state.
//!
//! ```text
//! <konf_dir>/
//! ├── store/<id>.yaml     canonical single-context konfs
//! ├── active/<pid>.yaml   per-shell active markers
//! └── latestkonf          id of the most recently set konf
//! ```

use fs_err as fs;
use std::path::{Path, PathBuf};

use crate::error::{KonfError, Result};

/// Mode for every regular file konf writes.
pub const KONF_FILE_MODE: u32 = 0o600;

/// Mode for every directory konf creates.
pub const KONF_DIR_MODE: u32 = 0o700;

/// Central configuration for all konf storage paths.
///
/// Production code uses [`StorageConfig::from_home`] which points to
/// `~/.kube/konfs`. Tests use [`StorageConfig::with_root`] on a temp dir.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    konf_dir: PathBuf,
}

impl StorageConfig {
    /// Uses `~/.kube/konfs` as konf directory.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(KonfError::HomeDirNotFound)?;
        Ok(Self::with_root(home.join(".kube").join("konfs")))
    }

    /// Creates a StorageConfig rooted at a custom konf directory.
    pub fn with_root(konf_dir: PathBuf) -> Self {
        Self { konf_dir }
    }

    pub fn konf_dir(&self) -> &Path {
        &self.konf_dir
    }

    /// Directory holding canonical konfs.
    pub fn store_dir(&self) -> PathBuf {
        self.konf_dir.join("store")
    }

    /// Directory holding per-process active markers.
    pub fn active_dir(&self) -> PathBuf {
        self.konf_dir.join("active")
    }

    /// File holding the id of the most recently set konf.
    pub fn latest_konf_file(&self) -> PathBuf {
        self.konf_dir.join("latestkonf")
    }

    /// Ensures the konf, store and active directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        create_private_dir(&self.konf_dir)?;
        create_private_dir(&self.store_dir())?;
        create_private_dir(&self.active_dir())?;
        Ok(())
    }
}

/// Creates `dir` with [`KONF_DIR_MODE`]. Existing directories are left as they are.
pub(crate) fn create_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, std::fs::Permissions::from_mode(KONF_DIR_MODE))?;
    }
    Ok(())
}

/// Writes `contents` to `path` with [`KONF_FILE_MODE`].
///
/// New files are created with that mode. A file that already exists is
/// tightened to it as well.
pub(crate) fn write_private_file(path: &Path, contents: &[u8]) -> Result<()> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use fs_err::os::unix::fs::OpenOptionsExt;
        options.mode(KONF_FILE_MODE);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(KONF_FILE_MODE))?;
    }
    file.write_all(contents)?;
    Ok(())
}
