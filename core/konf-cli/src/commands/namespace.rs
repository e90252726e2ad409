//! `konf namespace` / `konf ns`: change the namespace of the active konf.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{bail, Result};
use konf_core::set_namespace;
use tracing::info;

/// Sets `namespace` in the konf `KUBECONFIG` points to.
pub fn run(kubeconfig: Option<OsString>, namespace: &str) -> Result<()> {
    let path = match kubeconfig.filter(|value| !value.is_empty()) {
        Some(value) => PathBuf::from(value),
        None => bail!("KUBECONFIG is not set in your shell. Have you run konf set?"),
    };

    set_namespace(&path, namespace)?;
    info!(namespace, "Switched namespace");
    Ok(())
}
