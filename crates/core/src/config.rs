//! `jarsmith.json` configuration.
//!
//! Every field has a default, so an empty object (or a missing file) is a
//! valid configuration. `JARSMITH_CACHE_DIR` and `JARSMITH_REGISTRY_URL`
//! override the file.

use crate::archive::BasePrecedence;
use crate::error::{JarsmithError, Result};
use crate::freshness::DEFAULT_REGISTRY_URL;
use indexmap::IndexMap;
use jarsmith_api::{
    DEFAULT_EXTRA_ARGS, DEFAULT_PROTOCOLS, ExclusionRule, ExclusionRules, JarManifest,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "jarsmith.json";
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JarsmithConfig {
    pub registry_url: String,
    /// `None` selects `~/.jarsmith/transforms`
    pub cache_dir: Option<PathBuf>,
    pub concurrency: usize,
    pub request_timeout_secs: u64,
    /// Artifact file name prefix -> entry names to drop, in declaration order
    pub exclusions: IndexMap<String, Vec<String>>,
    pub manifest: Option<JarManifest>,
    pub base_precedence: BasePrecedence,
    pub native_image: NativeImageSettings,
    pub logging: LoggingSettings,
}

impl Default for JarsmithConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            cache_dir: None,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            exclusions: IndexMap::new(),
            manifest: None,
            base_precedence: BasePrecedence::default(),
            native_image: NativeImageSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeImageSettings {
    pub extra_args: Vec<String>,
    pub enabled_protocols: Vec<String>,
}

impl Default for NativeImageSettings {
    fn default() -> Self {
        Self {
            extra_args: DEFAULT_EXTRA_ARGS.iter().map(|s| s.to_string()).collect(),
            enabled_protocols: DEFAULT_PROTOCOLS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    pub level: String,
    /// Mirror events to stderr
    pub stderr: bool,
    /// Write daily-rolled files
    pub file: bool,
    /// `None` selects `~/.jarsmith/logs`
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            stderr: true,
            file: true,
            dir: None,
        }
    }
}

impl JarsmithConfig {
    /// Load `path`, falling back to defaults when it does not exist, then
    /// apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_json(&content).map_err(|e| {
                JarsmithError::Configuration(format!("invalid {}: {}", path.display(), e))
            })?
        } else {
            debug!("No config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Apply overrides, reading variables through `lookup`. Empty values
    /// are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("JARSMITH_CACHE_DIR").filter(|v| !v.is_empty()) {
            self.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup("JARSMITH_REGISTRY_URL").filter(|v| !v.is_empty()) {
            self.registry_url = url;
        }
    }

    pub fn exclusion_rules(&self) -> ExclusionRules {
        self.exclusions
            .iter()
            .map(|(prefix, entries)| ExclusionRule::new(prefix.clone(), entries.iter().cloned()))
            .collect()
    }

    /// Resolved cache directory, with a leading `~/` expanded
    pub fn cache_dir(&self) -> PathBuf {
        match &self.cache_dir {
            Some(dir) => expand_home(dir),
            None => default_home().join(".jarsmith").join("transforms"),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

fn default_home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

pub(crate) fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => default_home().join(rest),
        Err(_) => path.to_path_buf(),
    }
}
