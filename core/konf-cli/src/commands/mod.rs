//! Subcommand implementations.
//!
//! Every command takes an [`App`] plus whatever it needs from the outside
//! world (owner pid, picker, stdout) as arguments, so tests can drive them
//! against a temp konf dir without a terminal.

pub mod cleanup;
pub mod delete;
pub mod import;
pub mod namespace;
pub mod set;
pub mod shellwrapper;

use anyhow::{anyhow, Result};
use konf_core::{
    KonfId, KonfStore, Metadata, ProcessProbe, SessionManager, StorageConfig, SystemProbe,
};

/// Prefix on stdout telling the shell wrapper to export `KUBECONFIG`.
pub const KUBECONFIG_CHANGE_PREFIX: &str = "KUBECONFIGCHANGE:";

/// Interactive selection over listed konfs. Returns the chosen index.
pub type PickFn<'a> = &'a mut dyn FnMut(&[Metadata]) -> konf_core::Result<usize>;

pub struct App<P = SystemProbe> {
    pub store: KonfStore,
    pub sessions: SessionManager<P>,
}

impl App<SystemProbe> {
    pub fn new(storage: StorageConfig) -> Self {
        Self {
            store: KonfStore::new(storage.clone()),
            sessions: SessionManager::new(storage),
        }
    }
}

impl<P: ProcessProbe> App<P> {
    #[cfg(test)]
    pub fn with_probe(storage: StorageConfig, probe: P) -> Self {
        Self {
            store: KonfStore::new(storage.clone()),
            sessions: SessionManager::with_probe(storage, probe),
        }
    }
}

/// Lists every konf and lets `pick` choose one.
pub fn select_konf(store: &KonfStore, pick: PickFn<'_>) -> Result<KonfId> {
    let konfs = store.fetch_all()?;
    let index = pick(&konfs)?;
    let selected = konfs
        .get(index)
        .ok_or_else(|| anyhow!("invalid selection {}", index))?;
    Ok(selected.id())
}
