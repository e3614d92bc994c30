use crate::models::DependencyCoordinate;
use serde::{Deserialize, Serialize};

/// A dependency with a newer published version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeNotice {
    pub group: String,
    pub name: String,
    pub current: String,
    pub latest: String,
}

impl UpgradeNotice {
    /// Returns a notice only when `latest` differs from the pinned version.
    pub fn compare(coordinate: &DependencyCoordinate, latest: &str) -> Option<Self> {
        if coordinate.version == latest {
            return None;
        }
        Some(Self {
            group: coordinate.group.clone(),
            name: coordinate.name.clone(),
            current: coordinate.version.clone(),
            latest: latest.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare() {
        let coord = DependencyCoordinate::new("org.slf4j", "slf4j-api", "2.0.9");
        assert!(UpgradeNotice::compare(&coord, "2.0.9").is_none());

        let notice = UpgradeNotice::compare(&coord, "2.0.13").unwrap();
        assert_eq!(notice.current, "2.0.9");
        assert_eq!(notice.latest, "2.0.13");
    }
}
