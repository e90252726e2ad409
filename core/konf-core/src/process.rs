//! Process inspection helpers.
//!
//! Liveness is a plain "does a process with this pid exist" check. A pid that
//! was recycled by the OS for an unrelated process counts as alive, so its
//! marker survives until the next sweep after that process exits.

use sysinfo::{Pid, ProcessRefreshKind, System};

/// Answers whether a process is still running.
///
/// [`crate::SessionManager`] takes this as a seam so sweeps can be tested
/// without spawning and killing real processes.
pub trait ProcessProbe {
    fn is_alive(&self, pid: u32) -> bool;
}

/// Probe backed by the OS process table.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ProcessProbe for SystemProbe {
    fn is_alive(&self, pid: u32) -> bool {
        let mut sys = System::new();
        let sys_pid = Pid::from_u32(pid);
        sys.refresh_process_specifics(sys_pid, ProcessRefreshKind::new());
        sys.process(sys_pid).is_some()
    }
}

pub fn current_pid() -> u32 {
    std::process::id()
}

/// Pid of the process that launched us, normally the user's shell.
#[cfg(unix)]
pub fn parent_pid() -> Option<u32> {
    Some(std::os::unix::process::parent_id())
}

#[cfg(not(unix))]
pub fn parent_pid() -> Option<u32> {
    let mut sys = System::new();
    let own = Pid::from_u32(current_pid());
    sys.refresh_process_specifics(own, ProcessRefreshKind::new());
    sys.process(own)
        .and_then(|process| process.parent())
        .map(|pid| pid.as_u32())
}
