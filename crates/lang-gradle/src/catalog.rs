//! Gradle version catalogs (`gradle/libs.versions.toml`).
//!
//! Supported library notations:
//! - `alias = "group:name:version"`
//! - `alias = { module = "group:name", version = "..." }`
//! - `alias = { group = "...", name = "...", version.ref = "..." }`
//!
//! A rich version (`{ strictly = .., require = .., prefer = .. }`) resolves
//! to its first present constraint in that order.

use crate::error::Result;
use crate::model::GradleDependency;
use toml::{Table, Value};
use tracing::debug;

pub const CATALOG_PATH: &str = "gradle/libs.versions.toml";

/// Libraries declared in `content`, in catalog order.
pub fn parse_catalog(content: &str) -> Result<Vec<GradleDependency>> {
    let doc: Table = toml::from_str(content)?;

    let versions = doc.get("versions").and_then(Value::as_table);
    let Some(libraries) = doc.get("libraries").and_then(Value::as_table) else {
        return Ok(Vec::new());
    };

    let mut dependencies = Vec::new();
    for (alias, entry) in libraries {
        match parse_library(entry, versions) {
            Some(dep) => dependencies.push(dep),
            None => debug!("Skipping catalog entry {} with unsupported notation", alias),
        }
    }
    Ok(dependencies)
}

fn parse_library(entry: &Value, versions: Option<&Table>) -> Option<GradleDependency> {
    match entry {
        Value::String(notation) => {
            let mut parts = notation.splitn(3, ':');
            let group = parts.next()?;
            let name = parts.next()?;
            Some(GradleDependency::external(group, name, parts.next()))
        }
        Value::Table(table) => {
            let (group, name) = match table.get("module").and_then(Value::as_str) {
                Some(module) => module.split_once(':')?,
                None => (
                    table.get("group").and_then(Value::as_str)?,
                    table.get("name").and_then(Value::as_str)?,
                ),
            };
            let version = table
                .get("version")
                .and_then(|v| resolve_version(v, versions));
            Some(GradleDependency::external(group, name, version.as_deref()))
        }
        _ => None,
    }
}

fn resolve_version(version: &Value, versions: Option<&Table>) -> Option<String> {
    match version {
        Value::String(v) => Some(v.clone()),
        Value::Table(table) => {
            if let Some(key) = table.get("ref").and_then(Value::as_str) {
                return versions?
                    .get(key)
                    .and_then(|v| resolve_version(v, None));
            }
            ["strictly", "require", "prefer"]
                .iter()
                .find_map(|k| table.get(*k).and_then(Value::as_str))
                .map(str::to_string)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[versions]
bouncycastle = "1.80"
slf4j = { strictly = "2.0.9" }

[libraries]
bouncycastle = { module = "org.bouncycastle:bcprov-jdk18on", version.ref = "bouncycastle" }
slf4j-api = { group = "org.slf4j", name = "slf4j-api", version.ref = "slf4j" }
jackson = "com.fasterxml.jackson.core:jackson-databind:2.17.1"
sqlite = { module = "org.xerial:sqlite-jdbc", version = "3.46.0.0" }
junit-bom = { module = "org.junit:junit-bom" }
dangling = { module = "com.example:dangling", version.ref = "missing" }

[plugins]
graalvm = { id = "org.graalvm.buildtools.native", version = "0.10.2" }
"#;

    #[test]
    fn test_parse_all_notations() {
        let deps = parse_catalog(CATALOG).unwrap();
        let coords: Vec<String> = deps
            .iter()
            .filter_map(|d| d.coordinate())
            .map(|c| c.to_string())
            .collect();

        assert_eq!(
            coords,
            vec![
                "org.bouncycastle:bcprov-jdk18on:1.80",
                "org.slf4j:slf4j-api:2.0.9",
                "com.fasterxml.jackson.core:jackson-databind:2.17.1",
                "org.xerial:sqlite-jdbc:3.46.0.0",
            ]
        );
    }

    #[test]
    fn test_unversioned_entries_kept_without_version() {
        let deps = parse_catalog(CATALOG).unwrap();
        let bom = deps.iter().find(|d| d.name == "junit-bom").unwrap();
        assert_eq!(bom.version, None);

        let dangling = deps.iter().find(|d| d.name == "dangling").unwrap();
        assert_eq!(dangling.version, None);
    }

    #[test]
    fn test_missing_libraries_table() {
        assert!(parse_catalog("[versions]\na = \"1\"\n").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(parse_catalog("[libraries\n").is_err());
    }
}
