pub mod archive;
pub mod config;
pub mod error;
pub mod freshness;
pub mod logging;
pub mod native;

pub use error::Result;
