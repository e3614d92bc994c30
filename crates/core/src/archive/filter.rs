use crate::error::{JarsmithError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use once_cell::sync::Lazy;

/// Metadata that never survives into a fat jar: signatures, signing
/// certificates, per-jar manifests, license and notice files, jar indexes,
/// and module descriptors.
pub const METADATA_EXCLUDES: &[&str] = &[
    "META-INF/*.SF",
    "META-INF/**/*.MF",
    "META-INF/*.DSA",
    "META-INF/*.RSA",
    "META-INF/NOTICE*",
    "META-INF/LICENSE*",
    "META-INF/INDEX.LIST",
    "**/module-info.class",
];

static METADATA_FILTER: Lazy<EntryFilter> = Lazy::new(|| {
    EntryFilter::new(METADATA_EXCLUDES).expect("built-in metadata patterns must compile")
});

/// Glob-based entry path filter. `*` never crosses a `/`.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl EntryFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern.as_ref())
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    JarsmithError::Configuration(format!(
                        "invalid exclude pattern '{}': {}",
                        pattern.as_ref(),
                        e
                    ))
                })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| JarsmithError::Configuration(e.to_string()))?;

        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set,
        })
    }

    /// The fixed fat-jar metadata filter
    pub fn metadata() -> Self {
        METADATA_FILTER.clone()
    }

    /// Metadata patterns followed by caller-supplied ones
    pub fn metadata_with<S: AsRef<str>>(extra: &[S]) -> Result<Self> {
        let mut patterns: Vec<String> = METADATA_EXCLUDES.iter().map(|p| p.to_string()).collect();
        patterns.extend(extra.iter().map(|p| p.as_ref().to_string()));
        Self::new(&patterns)
    }

    pub fn is_excluded(&self, entry_path: &str) -> bool {
        self.set.is_match(entry_path)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
