//! Per-shell activation and reclamation of konfs.
//!
//! A shell has a konf active while `<konf_dir>/active/<pid>.yaml` exists. The
//! marker is a verbatim copy of the stored konf, so `KUBECONFIG` can point at
//! it and the shell is free to mutate it (e.g. switching namespace) without
//! touching the store.
//!
//! Markers are reclaimed two ways:
//! - [`SessionManager::self_clean`] is run from the shell's exit hook and
//!   removes the marker of the shell that launched us
//! - [`SessionManager::sweep_leftovers`] removes markers whose owning process
//!   no longer exists, catching shells that were killed before their hook ran

use std::path::PathBuf;

use fs_err as fs;
use tracing::{debug, info, warn};

use crate::error::{KonfError, Result};
use crate::id::KonfId;
use crate::process::{ProcessProbe, SystemProbe};
use crate::storage::{create_private_dir, write_private_file, StorageConfig};

/// Results from a leftover sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepStats {
    /// Markers removed because their process is gone.
    pub removed: u32,
    /// Markers kept because their process still exists.
    pub kept: u32,
    /// Entries whose name is not a process id.
    pub skipped: u32,
}

pub struct SessionManager<P = SystemProbe> {
    storage: StorageConfig,
    probe: P,
}

impl SessionManager<SystemProbe> {
    pub fn new(storage: StorageConfig) -> Self {
        Self::with_probe(storage, SystemProbe)
    }
}

impl<P: ProcessProbe> SessionManager<P> {
    pub fn with_probe(storage: StorageConfig, probe: P) -> Self {
        Self { storage, probe }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Copies the stored konf `id` to the active marker of `owner_pid`.
    ///
    /// Returns the marker path, which the shell exports as `KUBECONFIG`.
    pub fn activate(&self, id: &KonfId, owner_pid: u32) -> Result<PathBuf> {
        let konf = fs::read(id.store_path(&self.storage))?;

        let active = KonfId::from_process_id(owner_pid).active_path(&self.storage);
        if let Some(parent) = active.parent() {
            create_private_dir(parent)?;
        }
        write_private_file(&active, &konf)?;

        debug!(id = %id, pid = owner_pid, path = %active.display(), "Activated konf");
        Ok(active)
    }

    /// Removes the active marker of `owner_pid`. A missing marker is fine.
    pub fn self_clean(&self, owner_pid: u32) -> Result<()> {
        let path = KonfId::from_process_id(owner_pid).active_path(&self.storage);

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed own active konf");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "Current konf was already deleted, nothing to self-cleanup"
                );
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Removes every active marker whose owning process is gone.
    ///
    /// A missing active directory is an error: it means the konf dir was
    /// never set up, not that there is nothing to clean.
    pub fn sweep_leftovers(&self) -> Result<SweepStats> {
        let mut stats = SweepStats::default();

        for entry in fs::read_dir(self.storage.active_dir())? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if name.starts_with('.') || entry.file_type()?.is_dir() {
                continue;
            }

            let Some(pid) = KonfId::from_file_name(&name).as_process_id() else {
                warn!(
                    file = %name,
                    "File name is not a valid process id. Skipping for cleanup"
                );
                stats.skipped += 1;
                continue;
            };

            if self.probe.is_alive(pid) {
                stats.kept += 1;
                continue;
            }

            match fs::remove_file(entry.path()) {
                Ok(()) => debug!(pid, "Removed leftover active konf"),
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!(pid, "Leftover active konf was already removed");
                }
                Err(err) => return Err(err.into()),
            }
            stats.removed += 1;
        }

        Ok(stats)
    }

    /// Records `id` as the most recently set konf.
    pub fn save_latest(&self, id: &KonfId) -> Result<()> {
        let path = self.storage.latest_konf_file();
        if let Some(parent) = path.parent() {
            create_private_dir(parent)?;
        }
        write_private_file(&path, id.as_str().as_bytes())
    }

    /// Returns the most recently set konf.
    pub fn load_latest(&self) -> Result<KonfId> {
        match fs::read_to_string(self.storage.latest_konf_file()) {
            Ok(raw) => Ok(KonfId::new(raw.trim())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(KonfError::NoLatestKonf)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::parent_pid;
    use std::collections::HashSet;
    use tempfile::TempDir;

    struct FakeProbe {
        alive: HashSet<u32>,
    }

    impl FakeProbe {
        fn with(alive: &[u32]) -> Self {
            Self {
                alive: alive.iter().copied().collect(),
            }
        }
    }

    impl ProcessProbe for FakeProbe {
        fn is_alive(&self, pid: u32) -> bool {
            self.alive.contains(&pid)
        }
    }

    fn setup<P: ProcessProbe>(probe: P) -> (TempDir, SessionManager<P>) {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().join("konf"));
        storage.ensure_dirs().unwrap();
        (temp, SessionManager::with_probe(storage, probe))
    }

    fn write_marker<P>(manager: &SessionManager<P>, name: &str) -> PathBuf {
        let path = manager.storage.active_dir().join(name);
        std::fs::write(&path, "konf").unwrap();
        path
    }

    #[test]
    fn test_activate_copies_store_bytes() {
        let (_temp, manager) = setup(FakeProbe::with(&[]));
        let id = KonfId::new("dev-eu_dev-eu-1");
        std::fs::write(id.store_path(&manager.storage), "raw: bytes\n").unwrap();

        let active = manager.activate(&id, 4242).unwrap();

        assert_eq!(active, manager.storage.active_dir().join("4242.yaml"));
        assert_eq!(std::fs::read_to_string(&active).unwrap(), "raw: bytes\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_activate_writes_private_file() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, manager) = setup(FakeProbe::with(&[]));
        let id = KonfId::new("dev-eu_dev-eu-1");
        std::fs::write(id.store_path(&manager.storage), "raw").unwrap();

        let active = manager.activate(&id, 1).unwrap();
        let mode = std::fs::metadata(active).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_activate_unknown_id_is_not_found() {
        let (_temp, manager) = setup(FakeProbe::with(&[]));
        let err = manager.activate(&KonfId::new("missing"), 1).unwrap_err();
        assert!(err.is_not_found());
        assert!(!manager.storage.active_dir().join("1.yaml").exists());
    }

    #[test]
    fn test_self_clean_removes_marker() {
        let (_temp, manager) = setup(FakeProbe::with(&[]));
        let marker = write_marker(&manager, "77.yaml");
        manager.self_clean(77).unwrap();
        assert!(!marker.exists());
    }

    #[test]
    fn test_self_clean_is_idempotent() {
        let (_temp, manager) = setup(FakeProbe::with(&[]));
        write_marker(&manager, "77.yaml");
        manager.self_clean(77).unwrap();
        manager.self_clean(77).unwrap();
    }

    #[test]
    fn test_sweep_removes_dead_and_keeps_alive() {
        let (_temp, manager) = setup(FakeProbe::with(&[100]));
        let alive = write_marker(&manager, "100.yaml");
        let dead = write_marker(&manager, "200.yaml");

        let stats = manager.sweep_leftovers().unwrap();

        assert!(alive.exists());
        assert!(!dead.exists());
        assert_eq!(
            stats,
            SweepStats {
                removed: 1,
                kept: 1,
                skipped: 0
            }
        );
    }

    /// Reports every pid as dead, but removes its marker first, the way a
    /// second `konf cleanup` running at the same time would.
    struct RacingCleanup {
        active_dir: PathBuf,
    }

    impl ProcessProbe for RacingCleanup {
        fn is_alive(&self, pid: u32) -> bool {
            let _ = std::fs::remove_file(self.active_dir.join(format!("{}.yaml", pid)));
            false
        }
    }

    #[test]
    fn test_sweep_tolerates_marker_removed_concurrently() {
        let temp = TempDir::new().unwrap();
        let storage = StorageConfig::with_root(temp.path().join("konf"));
        storage.ensure_dirs().unwrap();
        let racing = RacingCleanup {
            active_dir: storage.active_dir(),
        };
        let manager = SessionManager::with_probe(storage, racing);
        let first = write_marker(&manager, "300.yaml");
        let second = write_marker(&manager, "301.yaml");

        let stats = manager.sweep_leftovers().unwrap();

        assert!(!first.exists());
        assert!(!second.exists());
        assert_eq!(stats.removed, 2);
        assert_eq!(stats.kept, 0);
    }

    #[test]
    fn test_sweep_skips_non_numeric_names() {
        let (_temp, manager) = setup(FakeProbe::with(&[]));
        let odd = write_marker(&manager, "not-a-pid.yaml");
        let hidden = write_marker(&manager, ".DS_Store");
        std::fs::create_dir(manager.storage.active_dir().join("123")).unwrap();

        let stats = manager.sweep_leftovers().unwrap();

        assert!(odd.exists());
        assert!(hidden.exists());
        assert!(manager.storage.active_dir().join("123").is_dir());
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.removed, 0);
    }

    #[test]
    fn test_sweep_missing_active_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let manager = SessionManager::with_probe(
            StorageConfig::with_root(temp.path().join("missing")),
            FakeProbe::with(&[]),
        );
        assert!(manager.sweep_leftovers().unwrap_err().is_not_found());
    }

    #[test]
    fn test_sweep_against_real_process_table() {
        let (_temp, manager) = setup(SystemProbe);
        let dead = write_marker(&manager, "99999999.yaml");
        let parent = parent_pid().unwrap();
        let own = write_marker(&manager, &format!("{}.yaml", parent));

        manager.sweep_leftovers().unwrap();

        assert!(!dead.exists());
        assert!(own.exists());

        manager.self_clean(parent).unwrap();
        assert!(!own.exists());
    }

    #[test]
    fn test_latest_round_trip() {
        let (_temp, manager) = setup(FakeProbe::with(&[]));
        assert!(matches!(
            manager.load_latest().unwrap_err(),
            KonfError::NoLatestKonf
        ));

        manager.save_latest(&KonfId::new("dev-eu_dev-eu-1")).unwrap();
        manager.save_latest(&KonfId::new("dev-asia_dev-asia-1")).unwrap();

        assert_eq!(manager.load_latest().unwrap().as_str(), "dev-asia_dev-asia-1");
    }
}
