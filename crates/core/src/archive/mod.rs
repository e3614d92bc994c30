//! Jar curation: entry exclusion, the transform cache, and fat-jar assembly.
//!
//! Every archive produced here is staged in a temporary file next to its
//! destination and renamed into place only once it is complete.

pub mod assemble;
pub mod cache;
pub mod filter;
pub mod manifest;
pub mod transform;
pub mod writer;

pub use assemble::{Assembler, AssemblyReport, BasePrecedence, DuplicateEntry};
pub use cache::{CacheKey, TransformCache};
pub use filter::EntryFilter;
pub use transform::{ArtifactTransform, TransformOutcome};
pub use writer::AtomicArchive;
