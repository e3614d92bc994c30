//! GraalVM toolchain discovery.
//!
//! The toolchain root comes from the environment only:
//! - GRAALVM_HOME
//! - JAVA_HOME (when it points at a GraalVM distribution)

use crate::error::{JarsmithError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variables consulted, in order
pub const TOOLCHAIN_VARS: &[&str] = &["GRAALVM_HOME", "JAVA_HOME"];

#[cfg(windows)]
const EXECUTABLE: &str = "native-image.cmd";
#[cfg(not(windows))]
const EXECUTABLE: &str = "native-image";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    root: PathBuf,
    executable: PathBuf,
}

impl Toolchain {
    /// Resolve from the process environment
    pub fn from_env() -> Result<Self> {
        Self::resolve(|name| std::env::var_os(name))
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        for var in TOOLCHAIN_VARS {
            let Some(value) = lookup(var).filter(|v| !v.is_empty()) else {
                continue;
            };
            let root = PathBuf::from(value);
            match Self::at(&root) {
                Some(toolchain) => return Ok(toolchain),
                None => debug!(
                    "{} points to {} which has no bin/{}",
                    var,
                    root.display(),
                    EXECUTABLE
                ),
            }
        }

        Err(JarsmithError::Configuration(format!(
            "no native-image toolchain found: set {} to a GraalVM installation",
            TOOLCHAIN_VARS.join(" or ")
        )))
    }

    /// A toolchain rooted at `root`, if it ships the compiler
    pub fn at(root: &Path) -> Option<Self> {
        let executable = root.join("bin").join(EXECUTABLE);
        executable.is_file().then(|| Self {
            root: root.to_path_buf(),
            executable,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Version from the distribution's `release` file
    pub fn version(&self) -> Option<String> {
        let content = std::fs::read_to_string(self.root.join("release")).ok()?;
        let mut java_version = None;
        for line in content.lines() {
            if let Some(v) = line.strip_prefix("GRAALVM_VERSION=") {
                return Some(v.trim_matches('"').to_string());
            }
            if let Some(v) = line.strip_prefix("JAVA_VERSION=") {
                java_version = Some(v.trim_matches('"').to_string());
            }
        }
        java_version
    }
}
