use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Inputs for one native-image compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeImageConfig {
    pub output_dir: PathBuf,
    pub binary_name: String,
    pub reflect_config: Option<PathBuf>,
    pub jni_config: Option<PathBuf>,
    pub proxy_config: Option<PathBuf>,
    pub resource_config: Option<PathBuf>,
    /// Additional compiler feature flags, rendered in sorted order
    pub feature_flags: BTreeSet<String>,
    pub classpath: Vec<PathBuf>,
    pub entry_point: String,
    /// Passed through verbatim after the feature flags
    pub extra_args: Vec<String>,
    /// Protocols for `--enable-url-protocols`
    pub enabled_protocols: Vec<String>,
}

pub const DEFAULT_PROTOCOLS: &[&str] = &["http", "https"];

pub const DEFAULT_EXTRA_ARGS: &[&str] = &[
    "-Dfile.encoding=UTF-8",
    "-J-Dfile.encoding=UTF-8",
    "-march=compatibility",
];
