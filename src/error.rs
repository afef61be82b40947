use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum FsError {
    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid name: {reason}")]
    NameInvalid { reason: String },
    #[error("name already exists: {}", path.display())]
    NameCollision { path: PathBuf },
    #[error("name cannot be empty")]
    EmptyInput,
    #[error("{} is not UTF-8 text", path.display())]
    NotText { path: PathBuf },
    #[error("{op} failed for {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Maps an I/O error from `op` on `path` onto the taxonomy.
    pub(crate) fn from_io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            io::ErrorKind::AlreadyExists => Self::NameCollision { path },
            _ => Self::Io { op, path, source },
        }
    }

    /// Short message for the status line.
    pub(crate) fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied { .. } => "Permission denied".to_string(),
            Self::NotFound { .. } => "File not found".to_string(),
            Self::WriteFailed { .. } => "Error while saving".to_string(),
            Self::NameInvalid { reason } => reason.clone(),
            Self::NameCollision { .. } => "File already exists".to_string(),
            Self::EmptyInput => "Filename cannot be empty".to_string(),
            Self::NotText { .. } => "File is not a text file".to_string(),
            Self::Io { op, .. } => format!("Could not {op}"),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
