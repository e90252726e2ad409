//! Shared fixtures for konf-core integration tests.

#![allow(dead_code)]

use konf_core::StorageConfig;
use tempfile::TempDir;

pub const DEV_EU_AND_ASIA: &str = r#"
apiVersion: v1
clusters:
- cluster:
    server: https://192.168.0.1
  name: dev-asia-1
- cluster:
    server: https://10.1.1.0
  name: dev-eu-1
contexts:
- context:
    cluster: dev-asia-1
    namespace: kube-system
    user: dev-asia
  name: dev-asia
- context:
    cluster: dev-eu-1
    namespace: kube-public
    user: dev-eu
  name: dev-eu
current-context: dev-eu
kind: Config
preferences: {}
users:
- name: dev-asia
  user:
    token: asia-token
- name: dev-eu
  user:
    token: eu-token
"#;

pub const DEV_EU: &str = r#"
apiVersion: v1
clusters:
- cluster:
    server: https://10.1.1.0
  name: dev-eu-1
contexts:
- context:
    cluster: dev-eu-1
    namespace: kube-public
    user: dev-eu
  name: dev-eu
current-context: dev-eu
kind: Config
preferences: {}
users:
- name: dev-eu
  user:
    token: eu-token
"#;

/// A konf dir inside a fresh temp dir, with store and active dirs created.
pub fn konf_dir() -> (TempDir, StorageConfig) {
    let temp = TempDir::new().expect("temp dir");
    let storage = StorageConfig::with_root(temp.path().join("konfs"));
    storage.ensure_dirs().expect("konf dirs");
    (temp, storage)
}
