use crate::error::FetchError;
use crate::models::DependencyCoordinate;
use async_trait::async_trait;

/// Source of published-version metadata for dependency coordinates.
///
/// Implementations must be read-only: the freshness scan calls
/// `latest_version` concurrently for unrelated coordinates.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Latest published version of the coordinate's `group:name`.
    async fn latest_version(&self, coordinate: &DependencyCoordinate)
    -> Result<String, FetchError>;

    /// Name used in diagnostics
    fn name(&self) -> &str;
}
