//! konf-go: per-shell kubeconfig switcher.
//!
//! Not meant to be called directly. The `konf` shell function printed by
//! `konf-go shellwrapper` wraps it, so that `set` can export `KUBECONFIG` in
//! the calling shell.
//!
//! ## Subcommands
//!
//! - `import`: Split kubeconfigs into single-context konfs in the store
//! - `set`: Activate a konf for the current shell
//! - `delete`: Remove konfs from the store
//! - `namespace` / `ns`: Change the namespace of the active konf
//! - `cleanup`: Remove active konfs of exited shells (shell exit hook)
//! - `shellwrapper`: Print the shell integration

mod commands;
mod logging;
mod picker;

use std::io;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use konf_core::{parent_pid, Settings};
use tracing::warn;

use commands::shellwrapper::Shell;
use commands::App;

#[derive(Parser)]
#[command(name = "konf-go")]
#[command(about = "Lightweight kubeconfig manager")]
#[command(long_about = "konf is a lightweight kubeconfig manager

Before switching between kubeconfigs make sure to import them via 'konf import'.
Afterwards switch between different kubeconfigs via 'konf set'.")]
#[command(version)]
struct Cli {
    /// konfs directory for kubeconfigs and tracking active konfs (default is $HOME/.kube/konfs)
    #[arg(long, global = true, value_name = "DIR")]
    konf_dir: Option<PathBuf>,

    /// Suppress log output
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import kubeconfigs into the konf store, one file per context
    Import {
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Set the kubeconfig to use in the current shell
    ///
    /// Without an argument a picker is shown. '-' selects the last used konf.
    Set {
        #[arg(value_name = "ID")]
        id: Option<String>,
    },

    /// Delete konfs from the store by id or glob, or via the picker
    Delete {
        #[arg(value_name = "ID_OR_GLOB")]
        patterns: Vec<String>,
    },

    /// Change the namespace of the active konf
    #[command(visible_alias = "ns")]
    Namespace {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Clean up active konfs that are no longer used by any shell
    Cleanup,

    /// Print the shell wrapper to source in your rc file
    Shellwrapper {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("konf execution has failed: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(None)?.apply_env();
    if let Some(dir) = cli.konf_dir {
        settings.konf_dir = Some(dir);
    }
    if cli.silent {
        settings.silent = true;
    }

    logging::init(settings.silent);

    let storage = settings.storage()?;
    storage
        .ensure_dirs()
        .with_context(|| format!("Could not create konf dir {}", storage.konf_dir().display()))?;

    let app = App::new(storage);

    // Cleanup sweeps on its own and reports failures.
    if !matches!(cli.command, Commands::Cleanup) {
        if let Err(err) = app.sessions.sweep_leftovers() {
            warn!(error = %err, "Could not clean up leftover konfs");
        }
    }

    let mut stdout = io::stdout();

    match cli.command {
        Commands::Import { paths } => {
            commands::import::run(&app, &paths)?;
        }
        Commands::Set { id } => {
            commands::set::run(
                &app,
                id.as_deref(),
                shell_pid()?,
                &mut picker::pick,
                &mut stdout,
            )?;
        }
        Commands::Delete { patterns } => {
            commands::delete::run(&app, &patterns, &mut picker::pick)?;
        }
        Commands::Namespace { name } => {
            commands::namespace::run(std::env::var_os("KUBECONFIG"), &name)?;
        }
        Commands::Cleanup => {
            commands::cleanup::run(&app, shell_pid()?)?;
        }
        Commands::Shellwrapper { shell } => {
            commands::shellwrapper::run(shell, &mut stdout)?;
        }
    }

    Ok(())
}

/// The shell that invoked us owns the active konf.
fn shell_pid() -> Result<u32> {
    parent_pid().ok_or_else(|| anyhow!("Could not determine the process id of the calling shell"))
}
