use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One element of a resolved runtime classpath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ClasspathElement {
    /// Every file below the directory becomes an entry at its relative path
    Directory(PathBuf),
    /// A zip-family archive (jar)
    Archive(PathBuf),
}

impl ClasspathElement {
    /// Classify a path by what is on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            ClasspathElement::Directory(path)
        } else {
            ClasspathElement::Archive(path)
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ClasspathElement::Directory(p) | ClasspathElement::Archive(p) => p,
        }
    }
}

impl fmt::Display for ClasspathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}
