//! `konf import`: split kubeconfigs into the store.
//!
//! Import is the only supported way to populate the store, since it is the
//! only writer that guarantees one context per file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use fs_err as fs;
use konf_core::{split_kubeconfig, ProcessProbe};
use tracing::{info, warn};

use super::App;

/// Imports every file in `paths`. Returns the store paths written.
pub fn run<P: ProcessProbe>(app: &App<P>, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for path in paths {
        written.extend(import_file(app, path)?);
    }
    Ok(written)
}

fn import_file<P: ProcessProbe>(app: &App<P>, path: &Path) -> Result<Vec<PathBuf>> {
    let raw = fs::read_to_string(path)?;
    let konfs = split_kubeconfig(&raw)?;

    if konfs.is_empty() {
        warn!(path = %path.display(), "Kubeconfig has no contexts, nothing to import");
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let mut written = Vec::with_capacity(konfs.len());

    for konf in &konfs {
        if !seen.insert(konf.id.clone()) {
            warn!(
                id = %konf.id,
                path = %path.display(),
                "Several contexts map to the same konf id, only the last one is kept"
            );
        } else if app.store.contains(&konf.id) {
            warn!(id = %konf.id, "Overwriting existing konf");
        }

        let stored = app.store.write_konf(konf)?;
        info!(id = %konf.id, path = %stored.display(), "Imported konf");
        written.push(stored);
    }

    Ok(written)
}
