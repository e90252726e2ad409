//! Konf and Metadata types.

use std::path::PathBuf;

use crate::id::KonfId;
use crate::kubeconfig::KubeConfig;
use crate::storage::StorageConfig;

/// A canonical single-context kubeconfig together with its identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Konf {
    pub id: KonfId,
    pub kubeconfig: KubeConfig,
}

impl Konf {
    pub fn new(id: KonfId, kubeconfig: KubeConfig) -> Self {
        Self { id, kubeconfig }
    }

    /// Where this konf lives inside the store.
    pub fn store_path(&self, storage: &StorageConfig) -> PathBuf {
        self.id.store_path(storage)
    }

    /// Name of the single context this konf carries.
    pub fn context_name(&self) -> Option<&str> {
        self.kubeconfig.contexts.first().map(|c| c.name.as_str())
    }

    /// Name of the single cluster this konf carries.
    pub fn cluster_name(&self) -> Option<&str> {
        self.kubeconfig.clusters.first().map(|c| c.name.as_str())
    }
}

/// Lightweight projection of a stored konf, used for listing and selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub context: String,
    pub cluster: String,
    pub file: PathBuf,
}

impl Metadata {
    /// The id this konf is stored under, taken from its file name.
    ///
    /// For konfs written by import this equals the canonical id of
    /// (cluster, context); a hand-renamed file keeps its own name.
    pub fn id(&self) -> KonfId {
        self.file
            .file_name()
            .map(|name| KonfId::from_file_name(&name.to_string_lossy()))
            .unwrap_or_else(|| KonfId::from_cluster_and_context(&self.cluster, &self.context))
    }
}
