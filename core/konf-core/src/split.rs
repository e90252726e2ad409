//! Splitting arbitrary kubeconfigs into canonical konfs.
//!
//! For every context in the input:
//! 1. find the cluster the context references
//! 2. find the user the context references
//! 3. build a new document holding exactly that context, cluster and user
//!
//! Unresolved references fall back to empty entries instead of failing, so
//! half-broken kubeconfigs can still be imported. A warning is emitted so the
//! resulting konf with an empty server does not go unnoticed.

use tracing::warn;

use crate::error::Result;
use crate::id::KonfId;
use crate::konf::Konf;
use crate::kubeconfig::{KubeConfig, NamedAuthInfo, NamedCluster};

/// Splits a raw kubeconfig into one konf per context.
///
/// A document without contexts yields an empty vec. Parse failures surface the
/// parser's error unchanged.
pub fn split_kubeconfig(raw: &str) -> Result<Vec<Konf>> {
    let original = KubeConfig::from_yaml(raw)?;
    Ok(split_document(&original))
}

/// Splits an already parsed kubeconfig.
pub fn split_document(original: &KubeConfig) -> Vec<Konf> {
    let mut konfs = Vec::with_capacity(original.contexts.len());

    for context in &original.contexts {
        let cluster = match original.find_cluster(&context.context.cluster) {
            Some(cluster) => cluster.clone(),
            None => {
                warn!(
                    context = %context.name,
                    cluster = %context.context.cluster,
                    "Context references an unknown cluster, using an empty cluster"
                );
                NamedCluster::default()
            }
        };

        let user = match original.find_user(&context.context.user) {
            Some(user) => user.clone(),
            None => {
                warn!(
                    context = %context.name,
                    user = %context.context.user,
                    "Context references an unknown user, using an empty user"
                );
                NamedAuthInfo::default()
            }
        };

        let id = KonfId::from_cluster_and_context(&cluster.name, &context.name);

        let kubeconfig = KubeConfig {
            api_version: original.api_version.clone(),
            kind: original.kind.clone(),
            preferences: original.preferences.clone(),
            current_context: context.name.clone(),
            clusters: vec![cluster],
            contexts: vec![context.clone()],
            users: vec![user],
            ..KubeConfig::default()
        };

        konfs.push(Konf::new(id, kubeconfig));
    }

    konfs
}
