//! Dependency coordinate discovery from Gradle inputs.

pub mod catalog;
pub mod discoverer;
pub mod error;
pub mod model;
pub mod parser;
pub mod project;

pub use catalog::parse_catalog;
pub use discoverer::GradleCacheDiscoverer;
pub use error::{GradleError, Result};
pub use model::{GradleDependency, GradleSettings};
pub use project::collect_coordinates;
