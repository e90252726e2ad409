//! # konf-core
//!
//! Core library for konf, a per-shell kubeconfig switcher. It owns everything
//! that touches the konf directory; the `konf-go` binary only parses
//! arguments, renders the picker and talks to the shell wrapper.
//!
//! ## Design Principles
//!
//! - **Synchronous**: No async runtime dependency. Every operation is a handful of blocking file calls.
//! - **Explicit paths**: Every component takes a [`StorageConfig`]; nothing reads process-wide state.
//! - **Soft listing**: One unreadable store file is logged and skipped, never fatal.
//! - **Strict purity**: A store file with several clusters or contexts stops the listing.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use konf_core::{split_kubeconfig, KonfStore, SessionManager, StorageConfig};
//!
//! let storage = StorageConfig::from_home()?;
//! storage.ensure_dirs()?;
//!
//! let store = KonfStore::new(storage.clone());
//! for konf in split_kubeconfig(&raw)? {
//!     store.write_konf(&konf)?;
//! }
//!
//! let sessions = SessionManager::new(storage);
//! let path = sessions.activate(&store.fetch_all()?[0].id(), shell_pid)?;
//! ```

pub mod error;
pub mod id;
pub mod konf;
pub mod kubeconfig;
pub mod namespace;
pub mod process;
pub mod session;
pub mod settings;
pub mod split;
pub mod storage;
pub mod store;

#[cfg(test)]
mod testdata;

// Re-export commonly used items at crate root
pub use error::{KonfError, Result};
pub use id::{KonfId, KONF_EXTENSION};
pub use konf::{Konf, Metadata};
pub use kubeconfig::KubeConfig;
pub use namespace::set_namespace;
pub use process::{current_pid, parent_pid, ProcessProbe, SystemProbe};
pub use session::{SessionManager, SweepStats};
pub use settings::Settings;
pub use split::{split_document, split_kubeconfig};
pub use storage::StorageConfig;
pub use store::KonfStore;
