//! Transform cache
//!
//! Rewritten artifacts are published under `<base>/<key>/<name>.jar`, where
//! the key hashes the artifact's file name, its content, and the canonical
//! form of the rule applied. A published file is complete by construction
//! (see [`AtomicArchive`](crate::archive::AtomicArchive)), so its existence
//! is a cache hit for this and every later process.

use crate::archive::transform::{
    ArtifactTransform, TransformOutcome, artifact_file_name, exclude_entries, output_file_name,
};
use crate::error::{JarsmithError, Result};
use dashmap::DashMap;
use jarsmith_api::cache::{CacheStats, CachedTransformSummary, TransformCacheManager};
use jarsmith_api::{ExclusionRule, ExclusionRules};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use xxhash_rust::xxh3::{Xxh3, xxh3_64};

/// Identity of one (artifact, rule) pair
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub struct CacheKey(pub u64);

impl CacheKey {
    pub fn compute(input: &Path, file_name: &str, rule: &ExclusionRule) -> Result<Self> {
        let content = content_hash(input)?;
        let key_str = format!("{}\0{:016x}\0{}", file_name, content, rule.canonical());
        Ok(Self(xxh3_64(key_str.as_bytes())))
    }

    pub fn hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

fn content_hash(path: &Path) -> Result<u64> {
    let mut file = File::open(path).map_err(|e| JarsmithError::archive_read(path, e))?;
    let mut hasher = Xxh3::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file
            .read(&mut buf)
            .map_err(|e| JarsmithError::archive_read(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.digest())
}

/// Shared, concurrency-safe cache of transform outputs.
pub struct TransformCache {
    base_dir: PathBuf,
    transform: ArtifactTransform,
    /// One lock per key: the first requester rewrites, the rest wait and hit
    locks: DashMap<CacheKey, Arc<Mutex<()>>>,
    rewrites: AtomicUsize,
    hits: AtomicUsize,
}

impl TransformCache {
    pub fn new(base_dir: PathBuf, rules: ExclusionRules) -> Self {
        Self {
            base_dir,
            transform: ArtifactTransform::new(rules),
            locks: DashMap::new(),
            rewrites: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn rules(&self) -> &ExclusionRules {
        self.transform.rules()
    }

    /// Number of rewrites performed by this instance
    pub fn rewrites(&self) -> usize {
        self.rewrites.load(Ordering::Relaxed)
    }

    /// Number of requests served from an already published output
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    fn entry_path(&self, key: CacheKey, file_name: &str) -> PathBuf {
        self.base_dir.join(key.hex()).join(output_file_name(file_name))
    }

    /// Transformed form of `input`, rewriting at most once per key.
    pub fn get_or_transform(&self, input: &Path) -> Result<TransformOutcome> {
        let file_name = artifact_file_name(input)?;
        let Some(rule) = self.transform.rule_for(&file_name) else {
            return Ok(TransformOutcome::Unchanged(input.to_path_buf()));
        };

        let key = CacheKey::compute(input, &file_name, rule)?;
        let target = self.entry_path(key, &file_name);

        let lock = Arc::clone(&*self.locks.entry(key).or_default());
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if target.is_file() {
            debug!("Transform cache hit for {} ({})", file_name, key.hex());
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(TransformOutcome::Rewritten(target));
        }

        exclude_entries(input, rule, &target)?;
        self.rewrites.fetch_add(1, Ordering::Relaxed);
        Ok(TransformOutcome::Rewritten(target))
    }

    /// Transform a batch in parallel. One result per input, in input order;
    /// a failing artifact does not affect the others.
    pub fn transform_all(&self, inputs: &[PathBuf]) -> Vec<(PathBuf, Result<TransformOutcome>)> {
        let results: Vec<_> = inputs
            .par_iter()
            .map(|input| (input.clone(), self.get_or_transform(input)))
            .collect();

        let rewritten = results
            .iter()
            .filter(|(_, r)| matches!(r, Ok(TransformOutcome::Rewritten(_))))
            .count();
        info!(
            "Transformed {} artifacts ({} rewritten, {} failed)",
            inputs.len(),
            rewritten,
            results.iter().filter(|(_, r)| r.is_err()).count()
        );

        results
    }

    /// Scan all published outputs
    pub fn scan(&self) -> Vec<CachedTransformSummary> {
        let mut summaries = Vec::new();

        let Ok(keys) = fs::read_dir(&self.base_dir) else {
            return summaries;
        };

        for key_dir in keys.flatten() {
            let key = key_dir.file_name().to_string_lossy().into_owned();
            let Ok(files) = fs::read_dir(key_dir.path()) else {
                continue;
            };
            for file in files.flatten() {
                let path = file.path();
                if path.extension().is_some_and(|ext| ext == "jar") {
                    if let Ok(metadata) = file.metadata() {
                        summaries.push(CachedTransformSummary {
                            key: key.clone(),
                            path,
                            size_bytes: metadata.len(),
                        });
                    }
                }
            }
        }

        summaries.sort_by(|a, b| a.path.cmp(&b.path));
        summaries
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let summaries = self.scan();
        CacheStats {
            total_entries: summaries.len(),
            total_bytes: summaries.iter().map(|s| s.size_bytes).sum(),
            cache_dir: self.base_dir.clone(),
        }
    }

    /// Remove every published output
    pub fn clear(&self) -> std::io::Result<()> {
        self.locks.clear();
        if self.base_dir.exists() {
            fs::remove_dir_all(&self.base_dir)?;
        }
        Ok(())
    }
}

impl TransformCacheManager for TransformCache {
    fn stats(&self) -> CacheStats {
        self.stats()
    }

    fn scan(&self) -> Vec<CachedTransformSummary> {
        self.scan()
    }

    fn clear(&self) -> std::io::Result<()> {
        self.clear()
    }
}
