//! Error types for konf-core operations.

use std::path::PathBuf;

/// All errors that can occur in konf-core operations.
///
/// Filesystem failures are carried as plain [`std::io::Error`] so callers can
/// inspect [`std::io::ErrorKind::NotFound`] without unwrapping a domain type.
#[derive(Debug, thiserror::Error)]
pub enum KonfError {
    // ─────────────────────────────────────────────────────────────────────
    // Document Errors
    // ─────────────────────────────────────────────────────────────────────
    /// The kubeconfig could not be parsed. The parser message is kept as-is.
    #[error(transparent)]
    Parse(#[from] serde_yaml::Error),

    #[error("Impure Store: The kubeconfig {path:?} contains multiple contexts and/or clusters. Please only use 'konf import' for populating the store")]
    KubeConfigOverload { path: PathBuf },

    #[error("The kubeconfig {path:?} does not contain any context")]
    NoContext { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────
    // Store Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("The konf store at {path:?} is empty. Please run 'konf import' to populate it")]
    EmptyStore { path: PathBuf },

    #[error("No konf file matched your search pattern {pattern:?}")]
    NoMatch { pattern: String },

    #[error("Could not apply glob {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Session Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Could not select latest konf, because no konf was yet set")]
    NoLatestKonf,

    #[error("Selection aborted")]
    Aborted,

    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Settings malformed: {path}: {details}")]
    Settings { path: PathBuf, details: String },

    #[error("Home directory not found")]
    HomeDirNotFound,

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl KonfError {
    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KonfError::Io(err) if err.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Convenience type alias for Results using KonfError.
pub type Result<T> = std::result::Result<T, KonfError>;

impl From<walkdir::Error> for KonfError {
    fn from(err: walkdir::Error) -> Self {
        KonfError::Io(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_is_detected_through_io_variant() {
        let err = KonfError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(err.is_not_found());
        assert!(!KonfError::NoLatestKonf.is_not_found());
    }

    #[test]
    fn test_overload_message_names_path() {
        let err = KonfError::KubeConfigOverload {
            path: PathBuf::from("/konfs/store/multi.yaml"),
        };
        assert!(err.to_string().contains("/konfs/store/multi.yaml"));
    }
}
