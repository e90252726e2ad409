//! Fixture kubeconfigs shared by unit tests.

pub const SINGLE_CLUSTER_SINGLE_CONTEXT_EU: &str = r#"
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
  user: {}
"#;

pub const SINGLE_CLUSTER_SINGLE_CONTEXT_ASIA: &str = r#"
apiVersion: v1
clusters:
- cluster:
    server: https://192.168.0.1
  name: dev-asia-1
contexts:
- context:
    cluster: dev-asia-1
    namespace: kube-system
    user: dev-asia
  name: dev-asia
current-context: dev-asia
kind: Config
preferences: {}
users:
- name: dev-asia
  user: {}
"#;

pub const MULTI_CLUSTER_MULTI_CONTEXT: &str = r#"
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
      namespace: kube-system
      cluster: dev-asia-1
      user: dev-asia
    name: dev-asia
  - context:
      namespace: kube-public
      cluster: dev-eu-1
      user: dev-eu
    name: dev-eu
current-context: dev-eu
kind: Config
preferences: {}
users:
  - name: dev-asia
    user: {}
  - name: dev-eu
    user: {}
"#;

pub const MULTI_CLUSTER_SINGLE_CONTEXT: &str = r#"
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
      cluster: dev-eu-1
      user: dev-eu
    name: dev-eu
current-context: dev-eu
kind: Config
users:
  - name: dev-eu
    user: {}
"#;

pub const SINGLE_CLUSTER_MULTI_CONTEXT: &str = r#"
apiVersion: v1
clusters:
  - cluster:
      server: https://10.1.1.0
    name: dev-eu-1
contexts:
  - context:
      cluster: dev-eu-1
      user: dev-eu
    name: dev-eu
  - context:
      cluster: dev-eu-1
      namespace: kube-system
      user: dev-eu
    name: dev-eu-system
current-context: dev-eu
kind: Config
users:
  - name: dev-eu
    user: {}
"#;

pub const NO_CONTEXT: &str = r#"
apiVersion: v1
clusters:
  - cluster:
      server: https://10.1.1.0
    name: dev-eu-1
kind: Config
preferences: {}
users:
  - name: dev-eu
    user: {}
"#;

pub const INVALID_YAML: &str = "I am no valid yaml";
