//! Fat-jar assembly
//!
//! Merges classpath elements into one archive. The first contributor of an
//! entry path wins; later contributors of the same path are dropped with a
//! warning. Metadata matched by the [`EntryFilter`] never reaches the output.

use crate::archive::filter::EntryFilter;
use crate::archive::manifest::{self, MANIFEST_PATH};
use crate::archive::writer::AtomicArchive;
use crate::error::{JarsmithError, Result, read_err, write_err};
use jarsmith_api::{ClasspathElement, JarManifest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive};

const GENERATED: &str = "<generated manifest>";

/// Where the artifact's own archive sits relative to its runtime classpath
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasePrecedence {
    /// Base entries are merged before the classpath and win every conflict
    First,
    /// Base entries are merged after the classpath
    #[default]
    Last,
}

/// One dropped duplicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEntry {
    pub path: String,
    pub kept_from: String,
    pub discarded_from: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
    pub output: PathBuf,
    pub entries_written: usize,
    pub excluded: usize,
    pub duplicates: Vec<DuplicateEntry>,
}

pub struct Assembler {
    filter: EntryFilter,
    manifest: Option<JarManifest>,
    base_precedence: BasePrecedence,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            filter: EntryFilter::metadata(),
            manifest: None,
            base_precedence: BasePrecedence::default(),
        }
    }

    pub fn with_filter(mut self, filter: EntryFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_manifest(mut self, manifest: JarManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    pub fn with_base_precedence(mut self, precedence: BasePrecedence) -> Self {
        self.base_precedence = precedence;
        self
    }

    /// The order in which sources are merged
    pub fn merge_order(
        &self,
        classpath: &[ClasspathElement],
        base: Option<&Path>,
    ) -> Vec<ClasspathElement> {
        let base = base.map(|p| ClasspathElement::Archive(p.to_path_buf()));
        let mut order = Vec::with_capacity(classpath.len() + 1);
        if self.base_precedence == BasePrecedence::First {
            order.extend(base.clone());
        }
        order.extend(classpath.iter().cloned());
        if self.base_precedence == BasePrecedence::Last {
            order.extend(base);
        }
        order
    }

    /// Merge `classpath` and `base` into `output`.
    pub fn assemble(
        &self,
        classpath: &[ClasspathElement],
        base: Option<&Path>,
        output: &Path,
    ) -> Result<AssemblyReport> {
        let archive = AtomicArchive::create(output)?;
        // the output may live inside a directory element
        let own_files = [canonical(archive.staging()), canonical(output)];
        let mut session = Session {
            filter: &self.filter,
            archive,
            own_files,
            seen: HashMap::new(),
            report: AssemblyReport {
                output: output.to_path_buf(),
                entries_written: 0,
                excluded: 0,
                duplicates: Vec::new(),
            },
        };

        let has_manifest = match (&self.manifest, base) {
            (Some(manifest), _) => {
                session.write_manifest(manifest)?;
                true
            }
            (None, Some(base)) => session.copy_manifest(base)?,
            (None, None) => false,
        };
        if !has_manifest {
            warn!(
                "{} has no manifest; configure one to set Main-Class",
                output.display()
            );
        }

        for element in self.merge_order(classpath, base) {
            match &element {
                ClasspathElement::Directory(dir) => session.add_directory(dir)?,
                ClasspathElement::Archive(jar) => session.add_archive(jar)?,
            }
        }

        let Session { archive, report, .. } = session;
        archive.publish()?;

        info!(
            "Assembled {} ({} entries, {} excluded, {} duplicates)",
            report.output.display(),
            report.entries_written,
            report.excluded,
            report.duplicates.len()
        );
        Ok(report)
    }
}

/// Canonical form of `path`; a file that does not exist yet resolves
/// through its parent.
fn canonical(path: &Path) -> PathBuf {
    if let Ok(resolved) = std::fs::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            std::fs::canonicalize(parent)
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

struct Session<'a> {
    filter: &'a EntryFilter,
    archive: AtomicArchive,
    /// staging file and destination, never packed into themselves
    own_files: [PathBuf; 2],
    /// entry path -> contributing source
    seen: HashMap<String, String>,
    report: AssemblyReport,
}

impl Session<'_> {
    fn file_options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644)
    }

    fn dir_options() -> SimpleFileOptions {
        SimpleFileOptions::default()
            .last_modified_time(DateTime::default())
            .unix_permissions(0o755)
    }

    /// Decide whether `path` from `source` goes into the output.
    fn admit(&mut self, path: &str, source: &str) -> bool {
        if self.filter.is_excluded(path) {
            self.report.excluded += 1;
            return false;
        }
        if let Some(kept_from) = self.seen.get(path) {
            // directories are shared by every contributor
            if !path.ends_with('/') {
                warn!(
                    "Duplicate entry {} from {} ignored (kept from {})",
                    path, source, kept_from
                );
                self.report.duplicates.push(DuplicateEntry {
                    path: path.to_string(),
                    kept_from: kept_from.clone(),
                    discarded_from: source.to_string(),
                });
            }
            return false;
        }
        self.seen.insert(path.to_string(), source.to_string());
        true
    }

    fn write_manifest(&mut self, manifest: &JarManifest) -> Result<()> {
        let target = self.archive.target().to_path_buf();
        let content = manifest::render(manifest);

        self.seen.insert("META-INF/".to_string(), GENERATED.to_string());
        self.archive
            .writer()
            .add_directory("META-INF/", Self::dir_options())
            .map_err(write_err(&target))?;

        self.seen.insert(MANIFEST_PATH.to_string(), GENERATED.to_string());
        let writer = self.archive.writer();
        writer
            .start_file(MANIFEST_PATH, Self::file_options())
            .map_err(write_err(&target))?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| JarsmithError::archive_write(&target, e))?;

        self.report.entries_written += 2;
        Ok(())
    }

    /// Carry `jar`'s own manifest over as the output's first entries.
    /// Returns `false` when it has none.
    fn copy_manifest(&mut self, jar: &Path) -> Result<bool> {
        let target = self.archive.target().to_path_buf();
        let file = File::open(jar).map_err(|e| JarsmithError::archive_read(jar, e))?;
        let mut input = ZipArchive::new(BufReader::new(file)).map_err(read_err(jar))?;
        let Some(index) = input.index_for_name(MANIFEST_PATH) else {
            return Ok(false);
        };

        let source = jar.display().to_string();
        self.seen.insert("META-INF/".to_string(), source.clone());
        self.archive
            .writer()
            .add_directory("META-INF/", Self::dir_options())
            .map_err(write_err(&target))?;

        self.seen.insert(MANIFEST_PATH.to_string(), source);
        let entry = input.by_index_raw(index).map_err(read_err(jar))?;
        self.archive
            .writer()
            .raw_copy_file(entry)
            .map_err(write_err(&target))?;

        self.report.entries_written += 2;
        Ok(true)
    }

    fn add_directory(&mut self, dir: &Path) -> Result<()> {
        let target = self.archive.target().to_path_buf();
        let source = dir.display().to_string();
        let root = canonical(dir);

        for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| JarsmithError::archive_read(dir, e))?;
            let Ok(relative) = entry.path().strip_prefix(dir) else {
                continue;
            };
            if self.own_files.contains(&root.join(relative)) {
                debug!("Skipping {} (assembly output)", entry.path().display());
                continue;
            }
            let mut name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if entry.file_type().is_dir() {
                name.push('/');
                if self.admit(&name, &source) {
                    self.archive
                        .writer()
                        .add_directory(name.as_str(), Self::dir_options())
                        .map_err(write_err(&target))?;
                    self.report.entries_written += 1;
                }
            } else if entry.file_type().is_file() && self.admit(&name, &source) {
                let mut input = File::open(entry.path())
                    .map_err(|e| JarsmithError::archive_read(entry.path(), e))?;
                let writer = self.archive.writer();
                writer
                    .start_file(name.as_str(), Self::file_options())
                    .map_err(write_err(&target))?;
                std::io::copy(&mut input, writer)
                    .map_err(|e| JarsmithError::archive_write(&target, e))?;
                self.report.entries_written += 1;
            }
        }
        Ok(())
    }

    fn add_archive(&mut self, jar: &Path) -> Result<()> {
        let target = self.archive.target().to_path_buf();
        let source = jar.display().to_string();

        let file = File::open(jar).map_err(|e| JarsmithError::archive_read(jar, e))?;
        let mut input = ZipArchive::new(BufReader::new(file)).map_err(read_err(jar))?;

        for i in 0..input.len() {
            let entry = input.by_index_raw(i).map_err(read_err(jar))?;
            let name = entry.name().to_string();
            if !self.admit(&name, &source) {
                continue;
            }
            self.archive
                .writer()
                .raw_copy_file(entry)
                .map_err(write_err(&target))?;
            self.report.entries_written += 1;
        }
        Ok(())
    }
}
