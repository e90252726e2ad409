//! Integration tests for the import → store → activate → cleanup lifecycle.

mod common;

use common::{konf_dir, DEV_EU, DEV_EU_AND_ASIA};
use konf_core::{
    parent_pid, set_namespace, split_kubeconfig, KonfError, KonfId, KonfStore, KubeConfig,
    SessionManager,
};

#[test]
fn test_split_write_read_round_trip() {
    let (_temp, storage) = konf_dir();
    let store = KonfStore::new(storage);

    let konf = split_kubeconfig(DEV_EU).unwrap().remove(0);
    store.write_konf(&konf).unwrap();

    let read_back = KubeConfig::from_slice(&store.read_konf(&konf.id).unwrap()).unwrap();
    assert_eq!(read_back, KubeConfig::from_yaml(DEV_EU).unwrap());
}

#[test]
fn test_imported_konfs_are_pure() {
    let (_temp, storage) = konf_dir();
    let store = KonfStore::new(storage);

    for konf in split_kubeconfig(DEV_EU_AND_ASIA).unwrap() {
        store.write_konf(&konf).unwrap();
    }

    let listed = store.fetch_all().unwrap();
    let ids: Vec<_> = listed.iter().map(|m| m.id()).collect();
    assert_eq!(
        ids,
        vec![KonfId::new("dev-asia_dev-asia-1"), KonfId::new("dev-eu_dev-eu-1")]
    );

    for metadata in &listed {
        let conf = KubeConfig::from_slice(&std::fs::read(&metadata.file).unwrap()).unwrap();
        assert_eq!(conf.clusters.len(), 1);
        assert_eq!(conf.contexts.len(), 1);
        assert_eq!(conf.users.len(), 1);
        assert_eq!(conf.current_context, metadata.context);
    }
}

#[test]
fn test_impure_file_aborts_listing() {
    let (_temp, storage) = konf_dir();
    let store = KonfStore::new(storage.clone());
    let konf = split_kubeconfig(DEV_EU).unwrap().remove(0);
    store.write_konf(&konf).unwrap();

    let impure = storage.store_dir().join("zz-impure.yaml");
    std::fs::write(&impure, DEV_EU_AND_ASIA).unwrap();

    match store.fetch_all() {
        Err(KonfError::KubeConfigOverload { path }) => assert_eq!(path, impure),
        other => panic!("expected KubeConfigOverload, got {:?}", other),
    }
}

#[test]
fn test_empty_store_and_no_match_are_distinct() {
    let (_temp, storage) = konf_dir();
    let store = KonfStore::new(storage);

    assert!(matches!(
        store.fetch_all().unwrap_err(),
        KonfError::EmptyStore { .. }
    ));

    let konf = split_kubeconfig(DEV_EU).unwrap().remove(0);
    store.write_konf(&konf).unwrap();

    assert!(matches!(
        store.fetch_glob("prod-*").unwrap_err(),
        KonfError::NoMatch { .. }
    ));
}

#[test]
fn test_activate_namespace_and_cleanup() {
    let (_temp, storage) = konf_dir();
    let store = KonfStore::new(storage.clone());
    let sessions = SessionManager::new(storage.clone());

    for konf in split_kubeconfig(DEV_EU_AND_ASIA).unwrap() {
        store.write_konf(&konf).unwrap();
    }

    let shell = parent_pid().unwrap();
    let id = store.fetch_glob("dev-eu*").unwrap()[0].id();
    let active = sessions.activate(&id, shell).unwrap();
    sessions.save_latest(&id).unwrap();

    set_namespace(&active, "monitoring").unwrap();
    let conf = KubeConfig::from_slice(&std::fs::read(&active).unwrap()).unwrap();
    assert_eq!(conf.contexts[0].context.namespace.as_deref(), Some("monitoring"));

    let leftover = storage.active_dir().join("99999999.yaml");
    std::fs::write(&leftover, "stale").unwrap();

    let stats = sessions.sweep_leftovers().unwrap();
    assert_eq!(stats.removed, 1);
    assert!(!leftover.exists());
    assert!(active.exists());

    sessions.self_clean(shell).unwrap();
    sessions.self_clean(shell).unwrap();
    assert!(!active.exists());

    assert_eq!(sessions.load_latest().unwrap(), id);
}

#[test]
fn test_delete_by_glob_leaves_others() {
    let (_temp, storage) = konf_dir();
    let store = KonfStore::new(storage);
    for konf in split_kubeconfig(DEV_EU_AND_ASIA).unwrap() {
        store.write_konf(&konf).unwrap();
    }

    for id in store.ids_for_globs(&["*asia*"]).unwrap() {
        store.delete_konf(&id).unwrap();
    }

    let remaining: Vec<_> = store.fetch_all().unwrap().iter().map(|m| m.id()).collect();
    assert_eq!(remaining, vec![KonfId::new("dev-eu_dev-eu-1")]);
}
