//! `konf shellwrapper`: print the shell function that drives `konf-go`.
//!
//! Source the output in your rc file:
//!
//! ```bash
//! source <(konf-go shellwrapper zsh)
//! ```
//!
//! The wrapper exports `KUBECONFIG` whenever `konf-go` prints a line starting
//! with `KUBECONFIGCHANGE:`, passes any other output through, and runs
//! `konf-go cleanup` when the shell exits.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Zsh,
    Bash,
}

const ZSH_WRAPPER: &str = r#"
konf() {
  local res code
  res=$(konf-go "$@")
  code=$?
  if [[ $res == KUBECONFIGCHANGE:* ]]; then
    export KUBECONFIG="${res#KUBECONFIGCHANGE:}"
  elif [[ -n $res ]]; then
    printf '%s\n' "$res"
  fi
  return $code
}
konf_cleanup() {
  konf-go cleanup
}
autoload -Uz add-zsh-hook
add-zsh-hook zshexit konf_cleanup
"#;

const BASH_WRAPPER: &str = r#"
konf() {
  local res code
  res=$(konf-go "$@")
  code=$?
  if [[ $res == KUBECONFIGCHANGE:* ]]; then
    export KUBECONFIG="${res#KUBECONFIGCHANGE:}"
  elif [[ -n $res ]]; then
    printf '%s\n' "$res"
  fi
  return $code
}
konf_cleanup() {
  konf-go cleanup
}
trap konf_cleanup EXIT
"#;

pub fn script(shell: Shell) -> &'static str {
    match shell {
        Shell::Zsh => ZSH_WRAPPER,
        Shell::Bash => BASH_WRAPPER,
    }
}

pub fn run(shell: Shell, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", script(shell))?;
    Ok(())
}
