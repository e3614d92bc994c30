pub use jarsmith_api::error::{FetchError, JarsmithError, Result};

use std::path::Path;

/// Maps a zip failure on `path` to an archive read error.
pub(crate) fn read_err(path: &Path) -> impl FnOnce(zip::result::ZipError) -> JarsmithError {
    move |e| JarsmithError::archive_read(path, e)
}

/// Maps a zip failure on `path` to an archive write error.
pub(crate) fn write_err(path: &Path) -> impl FnOnce(zip::result::ZipError) -> JarsmithError {
    move |e| JarsmithError::archive_write(path, e)
}
