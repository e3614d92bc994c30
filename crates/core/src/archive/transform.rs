//! Artifact transform: strip configured entries from a dependency jar.

use crate::archive::writer::AtomicArchive;
use crate::error::{JarsmithError, Result, read_err, write_err};
use jarsmith_api::{ExclusionRule, ExclusionRules};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Result of running the transform over one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// No rule matched; the original artifact is used as-is
    Unchanged(PathBuf),
    /// A rewritten copy without the excluded entries
    Rewritten(PathBuf),
}

impl TransformOutcome {
    pub fn path(&self) -> &Path {
        match self {
            TransformOutcome::Unchanged(p) | TransformOutcome::Rewritten(p) => p,
        }
    }

    pub fn into_path(self) -> PathBuf {
        match self {
            TransformOutcome::Unchanged(p) | TransformOutcome::Rewritten(p) => p,
        }
    }
}

/// Applies the first matching [`ExclusionRule`] to an artifact.
#[derive(Debug, Clone, Default)]
pub struct ArtifactTransform {
    rules: ExclusionRules,
}

impl ArtifactTransform {
    pub fn new(rules: ExclusionRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ExclusionRules {
        &self.rules
    }

    /// The rule that applies to `file_name`, if any
    pub fn rule_for(&self, file_name: &str) -> Option<&ExclusionRule> {
        self.rules.find(file_name)
    }

    /// Rewrite `input` into `output_dir` when a rule matches its file name.
    pub fn transform(&self, input: &Path, output_dir: &Path) -> Result<TransformOutcome> {
        let file_name = artifact_file_name(input)?;
        let Some(rule) = self.rule_for(&file_name) else {
            return Ok(TransformOutcome::Unchanged(input.to_path_buf()));
        };

        let target = output_dir.join(output_file_name(&file_name));
        exclude_entries(input, rule, &target)?;
        Ok(TransformOutcome::Rewritten(target))
    }
}

pub(crate) fn artifact_file_name(input: &Path) -> Result<String> {
    input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| JarsmithError::archive_read(input, "path has no file name"))
}

/// `foo-1.0.aar` -> `foo-1.0.jar`; names without an extension get one.
pub fn output_file_name(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    format!("{}.jar", stem)
}

/// Copy every entry of `input` not excluded by `rule` into `target`.
///
/// Retained entries are copied raw: compressed bytes, CRC, timestamps, and
/// compression method are untouched, so output is a pure function of input.
/// Returns the number of entries dropped.
pub fn exclude_entries(input: &Path, rule: &ExclusionRule, target: &Path) -> Result<usize> {
    let file = File::open(input).map_err(|e| JarsmithError::archive_read(input, e))?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(read_err(input))?;
    let mut output = AtomicArchive::create(target)?;
    let mut dropped = 0;

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i).map_err(read_err(input))?;
        if rule.excludes(entry.name()) {
            debug!("Excluding {} from {}", entry.name(), input.display());
            dropped += 1;
            continue;
        }
        output
            .writer()
            .raw_copy_file(entry)
            .map_err(write_err(target))?;
    }

    output.publish()?;
    debug!(
        "Rewrote {} -> {} ({} entries dropped)",
        input.display(),
        target.display(),
        dropped
    );
    Ok(dropped)
}
