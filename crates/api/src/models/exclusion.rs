use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Entries to strip from every artifact whose file name starts with `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub prefix: String,
    /// Kept sorted so the rule has one canonical rendering for cache keys.
    pub excluded: BTreeSet<String>,
}

impl ExclusionRule {
    pub fn new<I, S>(prefix: impl Into<String>, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: prefix.into(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix)
    }

    pub fn excludes(&self, entry_path: &str) -> bool {
        self.excluded.contains(entry_path)
    }

    /// Stable textual form, used as part of the transform cache key.
    pub fn canonical(&self) -> String {
        let mut out = self.prefix.clone();
        for path in &self.excluded {
            out.push('\n');
            out.push_str(path);
        }
        out
    }
}

/// Exclusion rules in declaration order. The first matching prefix wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionRules {
    rules: Vec<ExclusionRule>,
}

impl ExclusionRules {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: ExclusionRule) {
        self.rules.push(rule);
    }

    pub fn find(&self, file_name: &str) -> Option<&ExclusionRule> {
        self.rules.iter().find(|rule| rule.matches(file_name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExclusionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<ExclusionRule> for ExclusionRules {
    fn from_iter<T: IntoIterator<Item = ExclusionRule>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
