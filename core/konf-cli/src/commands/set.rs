//! `konf set`: activate a konf for the calling shell.
//!
//! ```text
//! konf set            run the picker
//! konf set <id>       set a specific konf
//! konf set -          set the last used konf
//! ```

use std::io::Write;

use anyhow::{anyhow, Result};
use konf_core::{KonfId, ProcessProbe};
use tracing::info;

use super::{select_konf, App, PickFn, KUBECONFIG_CHANGE_PREFIX};

/// Argument selecting the previously set konf.
const LATEST: &str = "-";

pub fn run<P: ProcessProbe>(
    app: &App<P>,
    target: Option<&str>,
    owner_pid: u32,
    pick: PickFn<'_>,
    out: &mut dyn Write,
) -> Result<()> {
    let id = match target {
        None => select_konf(&app.store, pick)?,
        Some(LATEST) => app.sessions.load_latest()?,
        Some(raw) => KonfId::new(raw),
    };

    let active = app.sessions.activate(&id, owner_pid)?;

    app.sessions.save_latest(&id).map_err(|err| {
        anyhow!(
            "could not save latest konf. As a result 'konf set -' might not work: {}",
            err
        )
    })?;

    info!(id = %id, "Setting context");
    writeln!(out, "{}{}", KUBECONFIG_CHANGE_PREFIX, active.display())?;
    Ok(())
}
