use jarsmith_api::DependencyCoordinate;
use serde::{Deserialize, Serialize};

/// A dependency as declared in a Gradle input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GradleDependency {
    pub group: Option<String>,
    pub name: String,
    pub version: Option<String>,
    pub is_project: bool,
}

impl GradleDependency {
    pub fn external(group: &str, name: &str, version: Option<&str>) -> Self {
        Self {
            group: Some(group.to_string()),
            name: name.to_string(),
            version: version.map(str::to_string),
            is_project: false,
        }
    }

    pub fn project(path: &str) -> Self {
        Self {
            group: None,
            name: path.to_string(),
            version: None,
            is_project: true,
        }
    }

    /// The checkable coordinate. Project dependencies and declarations
    /// without a group or a version have none.
    pub fn coordinate(&self) -> Option<DependencyCoordinate> {
        if self.is_project {
            return None;
        }
        let group = self.group.as_deref().filter(|g| !g.is_empty())?;
        let version = self.version.as_deref().filter(|v| !v.is_empty())?;
        Some(DependencyCoordinate::new(group, &self.name, version))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GradleSettings {
    pub root_project_name: Option<String>,
    pub included_projects: Vec<String>,
}
