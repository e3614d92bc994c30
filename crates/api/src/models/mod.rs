pub mod classpath;
pub mod coordinate;
pub mod exclusion;
pub mod manifest;
pub mod native;
pub mod notice;

pub use classpath::*;
pub use coordinate::*;
pub use exclusion::*;
pub use manifest::*;
pub use native::*;
pub use notice::*;
