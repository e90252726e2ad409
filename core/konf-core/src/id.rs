//! Konf identifiers.
//!
//! A [`KonfId`] names every konf on disk. The canonical form is
//! `<context>_<cluster>`: the context name alone collides too often
//! (lots of kubeconfigs simply call it `default`), the pair rarely does.
//! Characters the filesystem reserves are replaced by `-`.
//!
//! Ids are compared only for equality. Nothing guarantees that two different
//! (cluster, context) pairs map to different ids.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::storage::StorageConfig;

/// Characters that must not end up in a file name.
const ILLEGAL_CHARS: [char; 2] = ['/', ':'];

/// Extension of every konf file in the store and active directories.
pub const KONF_EXTENSION: &str = "yaml";

/// Windows paths are limited to 260 characters, so ids are kept short there.
#[cfg(windows)]
const MAX_WINDOWS_ID_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KonfId(String);

impl KonfId {
    /// Creates the canonical id for a context and the cluster it points to.
    pub fn from_cluster_and_context(cluster: &str, context: &str) -> Self {
        let mut id = format!("{}_{}", context, cluster);
        for c in ILLEGAL_CHARS {
            id = id.replace(c, "-");
        }

        #[cfg(windows)]
        {
            truncate_on_char_boundary(&mut id, MAX_WINDOWS_ID_LEN);
        }

        KonfId(id)
    }

    /// Creates the id of an active marker owned by `pid`.
    pub fn from_process_id(pid: u32) -> Self {
        KonfId(pid.to_string())
    }

    /// Recovers an id from a stored file name by stripping its extension.
    ///
    /// The remainder is trusted to be a previously generated id.
    pub fn from_file_name(name: &str) -> Self {
        let stem = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        KonfId(stem)
    }

    /// Wraps a raw id given by the user (e.g. `konf set <id>`).
    pub fn new(raw: impl Into<String>) -> Self {
        KonfId(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<store_dir>/<id>.yaml`
    pub fn store_path(&self, storage: &StorageConfig) -> PathBuf {
        id_path(&storage.store_dir(), &self.0)
    }

    /// `<active_dir>/<id>.yaml`
    pub fn active_path(&self, storage: &StorageConfig) -> PathBuf {
        id_path(&storage.active_dir(), &self.0)
    }

    /// Interprets the id as a process id, if it is one.
    pub fn as_process_id(&self) -> Option<u32> {
        self.0.parse().ok()
    }
}

fn id_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("{}.{}", id, KONF_EXTENSION))
}

#[cfg(windows)]
fn truncate_on_char_boundary(id: &mut String, max: usize) {
    if id.len() <= max {
        return;
    }
    let mut end = max;
    while !id.is_char_boundary(end) {
        end -= 1;
    }
    id.truncate(end);
}

impl fmt::Display for KonfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KonfId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
