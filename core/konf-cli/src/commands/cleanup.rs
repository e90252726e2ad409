//! `konf cleanup`: reclaim active konfs.
//!
//! Run from the shell's exit hook. The sweep catches markers of shells that
//! died without running their hook; the self-clean removes the marker of the
//! exiting shell itself, which the sweep keeps since that shell is still alive.

use anyhow::Result;
use konf_core::{ProcessProbe, SweepStats};
use tracing::debug;

use super::App;

pub fn run<P: ProcessProbe>(app: &App<P>, owner_pid: u32) -> Result<SweepStats> {
    let stats = app.sessions.sweep_leftovers()?;
    debug!(
        removed = stats.removed,
        kept = stats.kept,
        skipped = stats.skipped,
        "Swept leftover konfs"
    );

    app.sessions.self_clean(owner_pid)?;
    Ok(stats)
}
