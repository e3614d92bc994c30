use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Summary of one published transform output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedTransformSummary {
    pub key: String,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Statistics for the transform cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_bytes: u64,
    pub cache_dir: PathBuf,
}

/// Service interface for inspecting and clearing the transform cache
pub trait TransformCacheManager: Send + Sync {
    /// Get cache statistics
    fn stats(&self) -> CacheStats;

    /// List every published transform output
    fn scan(&self) -> Vec<CachedTransformSummary>;

    /// Clear all cached data
    fn clear(&self) -> std::io::Result<()>;
}
