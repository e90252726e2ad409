//! File-backed konf store.
//!
//! Every file directly inside `<konf_dir>/store` is expected to be a konf:
//! a kubeconfig with exactly one cluster and exactly one context.
//!
//! # Listing
//!
//! Listing walks the store one level deep:
//! - subdirectories are ignored, never recursed into
//! - dotfiles (`.DS_Store` and friends) are ignored without a log line
//! - a file that does not parse is logged and skipped
//! - a file with more than one cluster or context aborts the whole listing,
//!   since every consumer downstream assumes single-context konfs
//!
//! An empty store and a store where nothing matches the glob are reported as
//! two different errors, so import and selection can react differently.
//!
//! # Writes
//!
//! Writes go straight to the target path and silently replace an existing
//! konf with the same id. There is no locking between processes.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use fs_err as fs;
use glob::{MatchOptions, Pattern};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{KonfError, Result};
use crate::id::{KonfId, KONF_EXTENSION};
use crate::konf::{Konf, Metadata};
use crate::kubeconfig::KubeConfig;
use crate::storage::{create_private_dir, write_private_file, StorageConfig};

/// Shell-glob semantics: `*` and `?` never cross a path separator.
const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

pub struct KonfStore {
    storage: StorageConfig,
}

impl KonfStore {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Retrieves metadata for every konf in the store.
    pub fn fetch_all(&self) -> Result<Vec<Metadata>> {
        self.fetch_glob("*")
    }

    /// Retrieves metadata for every konf whose id matches `pattern`.
    ///
    /// The pattern is a glob over ids: no directory, no `.yaml` extension.
    /// Results are sorted by file name, the same order a shell completes in.
    pub fn fetch_glob(&self, pattern: &str) -> Result<Vec<Metadata>> {
        let store_dir = self.storage.store_dir();
        let matcher = glob_for_ids(&store_dir, pattern)?;

        // Surfaces a missing store as NotFound before walking.
        fs::metadata(&store_dir)?;

        let mut files_checked = 0usize;
        let mut matched = Vec::new();

        for entry in WalkDir::new(&store_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            if is_hidden(entry.file_name()) {
                continue;
            }

            files_checked += 1;

            if matcher.matches_path_with(entry.path(), GLOB_OPTIONS) {
                matched.push(entry.into_path());
            }
        }

        if files_checked == 0 {
            return Err(KonfError::EmptyStore { path: store_dir });
        }

        if matched.is_empty() {
            return Err(KonfError::NoMatch {
                pattern: pattern.to_string(),
            });
        }

        matched.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let mut out = Vec::with_capacity(matched.len());
        for path in matched {
            if let Some(metadata) = read_metadata(&path)? {
                out.push(metadata);
            }
        }

        debug!(pattern, count = out.len(), "Fetched konfs");
        Ok(out)
    }

    /// Resolves each pattern to the ids of the konfs it matches.
    pub fn ids_for_globs<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<KonfId>> {
        let mut ids = Vec::new();
        for pattern in patterns {
            for metadata in self.fetch_glob(pattern.as_ref())? {
                ids.push(metadata.id());
            }
        }
        Ok(ids)
    }

    /// Marshals the konf and writes it to its store path.
    ///
    /// An existing konf with the same id is replaced.
    pub fn write_konf(&self, konf: &Konf) -> Result<PathBuf> {
        let yaml = konf.kubeconfig.to_yaml()?;
        let path = konf.store_path(&self.storage);

        if let Some(parent) = path.parent() {
            create_private_dir(parent)?;
        }
        write_private_file(&path, yaml.as_bytes())?;

        debug!(id = %konf.id, path = %path.display(), "Wrote konf");
        Ok(path)
    }

    /// Reads the raw bytes of a stored konf.
    pub fn read_konf(&self, id: &KonfId) -> Result<Vec<u8>> {
        Ok(fs::read(id.store_path(&self.storage))?)
    }

    pub fn contains(&self, id: &KonfId) -> bool {
        id.store_path(&self.storage).is_file()
    }

    /// Removes a konf from the store. Active copies are left alone.
    pub fn delete_konf(&self, id: &KonfId) -> Result<PathBuf> {
        let path = id.store_path(&self.storage);
        fs::remove_file(&path)?;
        info!(id = %id, path = %path.display(), "Deleted konf");
        Ok(path)
    }
}

/// Builds the matcher for `<store_dir>/<pattern>.yaml`.
///
/// Runs of `*` mean the same as a single `*`, so `dev**` behaves like `dev*`
/// instead of being rejected as a misplaced recursive wildcard.
fn glob_for_ids(store_dir: &Path, pattern: &str) -> Result<Pattern> {
    let full = format!(
        "{}/{}.{}",
        Pattern::escape(&store_dir.to_string_lossy()),
        collapse_stars(pattern),
        KONF_EXTENSION
    );
    Pattern::new(&full).map_err(|source| KonfError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    })
}

fn collapse_stars(pattern: &str) -> String {
    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Parses one store file into metadata.
///
/// `Ok(None)` means the file was skipped; only a purity violation is fatal.
fn read_metadata(path: &Path) -> Result<Option<Metadata>> {
    let raw = fs::read(path)?;

    let kubeconfig = match KubeConfig::from_slice(&raw) {
        Ok(kubeconfig) => kubeconfig,
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "File does not contain a valid kubeconfig. Skipping for evaluation"
            );
            return Ok(None);
        }
    };

    if kubeconfig.contexts.len() > 1 || kubeconfig.clusters.len() > 1 {
        return Err(KonfError::KubeConfigOverload {
            path: path.to_path_buf(),
        });
    }

    let (Some(context), Some(cluster)) = (kubeconfig.contexts.first(), kubeconfig.clusters.first())
    else {
        warn!(
            path = %path.display(),
            "Kubeconfig has no context or no cluster. Skipping for evaluation"
        );
        return Ok(None);
    };

    Ok(Some(Metadata {
        context: context.name.clone(),
        cluster: cluster.name.clone(),
        file: path.to_path_buf(),
    }))
}
