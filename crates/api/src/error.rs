use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum JarsmithError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Failed to read archive {path}: {reason}")]
    ArchiveRead { path: PathBuf, reason: String },
    #[error("Failed to write archive {path}: {reason}")]
    ArchiveWrite { path: PathBuf, reason: String },
    #[error("External process failed with {0}")]
    ExternalProcess(ExitStatus),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JarsmithError {
    pub fn archive_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        JarsmithError::ArchiveRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn archive_write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        JarsmithError::ArchiveWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JarsmithError>;

/// Failure to obtain the latest version of one coordinate.
///
/// Always recoverable: the affected coordinate is skipped.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Http { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("unable to parse metadata from {url}: {reason}")]
    Parse { url: String, reason: String },
    #[error("metadata at {url} has no versioning/latest element")]
    MissingLatest { url: String },
}
