//! Native-image driver: resolves a GraalVM toolchain and runs `native-image`.

pub mod args;
pub mod driver;
pub mod toolchain;

pub use args::{ConfigKind, FIXED_FLAGS, NativeImageArgs, SECURITY_FLAG, discover_config_files};
pub use driver::NativeImageDriver;
pub use toolchain::{TOOLCHAIN_VARS, Toolchain};
