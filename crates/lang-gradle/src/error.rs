use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GradleError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid version catalog: {0}")]
    Catalog(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GradleError>;
