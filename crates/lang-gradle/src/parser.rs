use crate::model::{GradleDependency, GradleSettings};
use once_cell::sync::Lazy;
use regex::Regex;

/// `"group:name:version"` literals, optionally with a classifier and an
/// `@ext` suffix. Interpolated versions (`$foo`) never match.
static DEPENDENCY_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["']([\w.\-]+):([\w.\-]+):([\w.\-+\[\](),]+)(?::[\w.\-]+)?(?:@\w+)?["']"#)
        .expect("dependency literal pattern must compile")
});

/// `project(':path')`, `project(path: ':path')`, `project(path = ":path")`
static PROJECT_DEPENDENCY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"project\s*\(\s*(?:path\s*[:=]\s*)?["']([^"']+)["']"#)
        .expect("project dependency pattern must compile")
});

static ROOT_PROJECT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"rootProject\.name\s*=\s*["']([^"']+)["']"#)
        .expect("root project pattern must compile")
});

static INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*include\b\s*\(?([^\n)]*)"#).expect("include pattern must compile")
});

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("quoted string pattern must compile"));

/// Dependencies declared in a Groovy or Kotlin build script, in source order.
/// Line comments are ignored.
pub fn parse_dependencies(source_code: &str) -> Vec<GradleDependency> {
    let mut dependencies = Vec::new();

    for line in source_code.lines() {
        let line = strip_line_comment(line);

        for cap in DEPENDENCY_LITERAL.captures_iter(line) {
            dependencies.push(GradleDependency::external(
                &cap[1],
                &cap[2],
                Some(&cap[3]),
            ));
        }
        for cap in PROJECT_DEPENDENCY.captures_iter(line) {
            dependencies.push(GradleDependency::project(&cap[1]));
        }
    }

    dependencies
}

/// Root project name and included project paths from a settings script.
pub fn parse_settings(source_code: &str) -> GradleSettings {
    let root_project_name = ROOT_PROJECT_NAME
        .captures(source_code)
        .map(|cap| cap[1].to_string());

    let mut included_projects = Vec::new();
    for cap in INCLUDE.captures_iter(source_code) {
        let args = strip_line_comment(&cap[1]);
        for quoted in QUOTED.captures_iter(args) {
            included_projects.push(quoted[1].to_string());
        }
    }

    GradleSettings {
        root_project_name,
        included_projects,
    }
}

fn strip_line_comment(line: &str) -> &str {
    match line.find("//") {
        // keep URLs such as "https://..." intact
        Some(idx) if !line[..idx].ends_with(':') => &line[..idx],
        _ => line,
    }
}
