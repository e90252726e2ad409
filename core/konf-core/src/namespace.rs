//! Namespace switching inside an active konf.

use std::path::Path;

use fs_err as fs;
use tracing::debug;

use crate::error::{KonfError, Result};
use crate::kubeconfig::KubeConfig;
use crate::storage::write_private_file;

/// Sets the namespace of the first context in the kubeconfig at `path`.
///
/// Konfs carry exactly one context, so the first one is the one in use. The
/// file is rewritten in place; the stored konf it was copied from is untouched.
pub fn set_namespace(path: &Path, namespace: &str) -> Result<()> {
    let raw = fs::read(path)?;
    let mut kubeconfig = KubeConfig::from_slice(&raw)?;

    let Some(context) = kubeconfig.contexts.first_mut() else {
        return Err(KonfError::NoContext {
            path: path.to_path_buf(),
        });
    };
    context.context.namespace = Some(namespace.to_string());

    write_private_file(path, kubeconfig.to_yaml()?.as_bytes())?;
    debug!(path = %path.display(), namespace, "Set namespace");
    Ok(())
}
