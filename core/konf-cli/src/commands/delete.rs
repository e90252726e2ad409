//! `konf delete`: remove konfs from the store.
//!
//! ```text
//! konf delete                   run the picker
//! konf delete <id> [<id>...]    delete specific konfs
//! konf delete "my-konf*"        delete konfs matching a glob
//! ```

use anyhow::Result;
use konf_core::{KonfId, ProcessProbe};
use tracing::info;

use super::{select_konf, App, PickFn};

/// Deletes the konfs named by `patterns`, or the picked one if empty.
pub fn run<P: ProcessProbe>(
    app: &App<P>,
    patterns: &[String],
    pick: PickFn<'_>,
) -> Result<Vec<KonfId>> {
    let ids = if patterns.is_empty() {
        vec![select_konf(&app.store, pick)?]
    } else {
        // Resolve everything first so a bad pattern deletes nothing.
        app.store.ids_for_globs(patterns)?
    };

    for id in &ids {
        app.store.delete_konf(id)?;
    }

    info!(
        "Deletion successful. If for security reasons you want to remove any currently \
         active konfs, close the shell sessions they are used in."
    );
    Ok(ids)
}
