pub mod cache;
pub mod error;
pub mod metadata;
pub mod models;

// Re-export commonly used types
pub use cache::{CacheStats, CachedTransformSummary, TransformCacheManager};
pub use error::{FetchError, JarsmithError, Result};
pub use metadata::MetadataSource;
pub use models::*;
