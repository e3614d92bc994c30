use crate::error::{JarsmithError, Result, write_err};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use zip::ZipWriter;

/// A zip archive staged in a temporary file beside its destination.
///
/// Nothing is visible at the destination until [`AtomicArchive::publish`]
/// succeeds. Dropping an unpublished archive removes the staging file.
pub struct AtomicArchive {
    target: PathBuf,
    staging: PathBuf,
    writer: ZipWriter<NamedTempFile>,
}

impl AtomicArchive {
    pub fn create(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| JarsmithError::archive_write(target, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".jarsmith-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| JarsmithError::archive_write(target, e))?;

        Ok(Self {
            target: target.to_path_buf(),
            staging: staging.path().to_path_buf(),
            writer: ZipWriter::new(staging),
        })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The temporary file being written; it sits in the target's directory
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    pub fn writer(&mut self) -> &mut ZipWriter<NamedTempFile> {
        &mut self.writer
    }

    /// Finish the central directory, flush, and rename into place.
    pub fn publish(self) -> Result<PathBuf> {
        let Self { target, writer, .. } = self;
        let staging = writer.finish().map_err(write_err(&target))?;
        staging
            .as_file()
            .sync_all()
            .map_err(|e| JarsmithError::archive_write(&target, e))?;
        staging
            .persist(&target)
            .map_err(|e| JarsmithError::archive_write(&target, e.error))?;
        Ok(target)
    }
}
