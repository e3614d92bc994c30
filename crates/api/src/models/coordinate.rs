use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A published package identified by `group:name:version`.
///
/// The full triple is the identity: the same artifact pinned to two
/// versions yields two distinct coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DependencyCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl DependencyCoordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }

    /// Group as a repository path, e.g. `org.bouncycastle` -> `org/bouncycastle`
    pub fn group_path(&self) -> String {
        self.group.replace('.', "/")
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate '{0}', expected group:name:version")]
pub struct CoordinateParseError(pub String);

impl FromStr for DependencyCoordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, name, version]
                if !group.is_empty() && !name.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*group, *name, *version))
            }
            _ => Err(CoordinateParseError(s.to_string())),
        }
    }
}
