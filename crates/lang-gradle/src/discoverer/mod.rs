pub mod cache;

pub use cache::{CachedArtifact, GradleCacheDiscoverer};
