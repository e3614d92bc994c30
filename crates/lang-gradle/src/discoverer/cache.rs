//! Gradle module cache discoverer.
//!
//! Finds resolved jars in the Gradle module cache:
//! `~/.gradle/caches/modules-2/files-2.1`

use jarsmith_api::DependencyCoordinate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One jar in the module cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedArtifact {
    pub path: PathBuf,
    pub coordinate: DependencyCoordinate,
}

pub struct GradleCacheDiscoverer {
    cache_path: Option<PathBuf>,
}

impl GradleCacheDiscoverer {
    pub fn new() -> Self {
        let cache_path = std::env::var_os("GRADLE_USER_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".gradle")))
            .map(|g| g.join("caches/modules-2/files-2.1"));

        Self { cache_path }
    }

    /// Create with a custom cache path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            cache_path: Some(path),
        }
    }

    pub fn cache_path(&self) -> Option<&Path> {
        self.cache_path.as_deref()
    }

    /// Parse a cache path into its coordinate.
    /// Layout: {root}/{group}/{artifact}/{version}/{hash}/{file}
    pub fn parse_cache_path(&self, path: &Path) -> Option<DependencyCoordinate> {
        let relative = path.strip_prefix(self.cache_path.as_ref()?).ok()?;
        let components: Vec<_> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();

        if components.len() != 5 {
            return None;
        }
        Some(DependencyCoordinate::new(
            &*components[0],
            &*components[1],
            &*components[2],
        ))
    }

    /// Every binary jar in the cache; sources and javadoc jars are skipped.
    pub fn discover(&self) -> Box<dyn Iterator<Item = CachedArtifact> + '_> {
        let Some(cache_path) = &self.cache_path else {
            return Box::new(std::iter::empty());
        };

        if !cache_path.exists() {
            return Box::new(std::iter::empty());
        }

        Box::new(
            WalkDir::new(cache_path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    let name = e.file_name().to_string_lossy();
                    name.ends_with(".jar")
                        && !name.ends_with("-sources.jar")
                        && !name.ends_with("-javadoc.jar")
                })
                .filter_map(move |e| {
                    let path = e.into_path();
                    let coordinate = self.parse_cache_path(&path)?;
                    Some(CachedArtifact { path, coordinate })
                }),
        )
    }

    /// Distinct coordinates present in the cache
    pub fn coordinates(&self) -> BTreeSet<DependencyCoordinate> {
        self.discover().map(|a| a.coordinate).collect()
    }
}

impl Default for GradleCacheDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}
