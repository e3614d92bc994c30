//! Coordinates declared by a Gradle project on disk.

use crate::catalog::{CATALOG_PATH, parse_catalog};
use crate::error::{GradleError, Result};
use crate::model::GradleDependency;
use crate::parser::{parse_dependencies, parse_settings};
use jarsmith_api::DependencyCoordinate;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const BUILD_SCRIPTS: &[&str] = &["build.gradle", "build.gradle.kts"];
const SETTINGS_SCRIPTS: &[&str] = &["settings.gradle", "settings.gradle.kts"];

/// Every checkable coordinate declared by the project rooted at `root`:
/// the version catalog plus the build scripts of the root project and of
/// each included project.
pub fn collect_coordinates(root: &Path) -> Result<BTreeSet<DependencyCoordinate>> {
    let mut dependencies: Vec<GradleDependency> = Vec::new();

    let catalog = root.join(CATALOG_PATH);
    if catalog.is_file() {
        dependencies.extend(parse_catalog(&read(&catalog)?)?);
    }

    for dir in project_dirs(root)? {
        for script in BUILD_SCRIPTS {
            let path = dir.join(script);
            if path.is_file() {
                debug!("Reading dependencies from {}", path.display());
                dependencies.extend(parse_dependencies(&read(&path)?));
            }
        }
    }

    Ok(dependencies.iter().filter_map(|d| d.coordinate()).collect())
}

/// The root directory followed by included project directories
fn project_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = vec![root.to_path_buf()];

    for name in SETTINGS_SCRIPTS {
        let path = root.join(name);
        if !path.is_file() {
            continue;
        }
        let settings = parse_settings(&read(&path)?);
        for project in settings.included_projects {
            let relative: PathBuf = project.split(':').filter(|s| !s.is_empty()).collect();
            if !relative.as_os_str().is_empty() {
                dirs.push(root.join(relative));
            }
        }
    }

    Ok(dirs)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| GradleError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_from_catalog_and_subprojects() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("gradle")).unwrap();
        fs::write(
            root.join(CATALOG_PATH),
            r#"
[versions]
slf4j = "2.0.9"
[libraries]
slf4j-api = { module = "org.slf4j:slf4j-api", version.ref = "slf4j" }
"#,
        )
        .unwrap();
        fs::write(root.join("settings.gradle.kts"), "include(\":lib\")\n").unwrap();
        fs::write(
            root.join("build.gradle.kts"),
            "dependencies { implementation(project(\":lib\")) }\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(
            root.join("lib/build.gradle.kts"),
            r#"dependencies {
    implementation("org.bouncycastle:bcprov-jdk18on:1.80")
    implementation("org.slf4j:slf4j-api:2.0.9")
}"#,
        )
        .unwrap();

        let coords: Vec<String> = collect_coordinates(root)
            .unwrap()
            .into_iter()
            .map(|c| c.to_string())
            .collect();

        assert_eq!(
            coords,
            vec![
                "org.bouncycastle:bcprov-jdk18on:1.80",
                "org.slf4j:slf4j-api:2.0.9",
            ]
        );
    }

    #[test]
    fn test_empty_project() {
        let temp = tempfile::tempdir().unwrap();
        assert!(collect_coordinates(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_catalog_is_error() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("gradle")).unwrap();
        fs::write(temp.path().join(CATALOG_PATH), "[libraries\n").unwrap();

        let err = collect_coordinates(temp.path()).unwrap_err();
        assert!(matches!(err, GradleError::Catalog(_)));
    }
}
