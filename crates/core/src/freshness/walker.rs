use crate::error::FetchError;
use futures::stream::{self, StreamExt};
use jarsmith_api::{DependencyCoordinate, MetadataSource, UpgradeNotice};
use std::collections::BTreeSet;
use tracing::debug;

/// Result of checking one coordinate
#[derive(Debug)]
pub struct FreshnessOutcome {
    pub coordinate: DependencyCoordinate,
    /// `Ok(None)` when the pinned version is the latest
    pub result: Result<Option<UpgradeNotice>, FetchError>,
}

/// Distinct checkable coordinates. Entries without a group or a version
/// cannot be looked up and are dropped.
pub fn unique_coordinates<I>(coordinates: I) -> BTreeSet<DependencyCoordinate>
where
    I: IntoIterator<Item = DependencyCoordinate>,
{
    coordinates
        .into_iter()
        .filter(|c| !c.group.is_empty() && !c.version.is_empty())
        .collect()
}

/// Check every distinct coordinate against `source`, at most `concurrency`
/// requests in flight. Performs no reporting; the order of outcomes is
/// completion order.
pub async fn scan<I>(
    source: &dyn MetadataSource,
    coordinates: I,
    concurrency: usize,
) -> Vec<FreshnessOutcome>
where
    I: IntoIterator<Item = DependencyCoordinate>,
{
    let unique = unique_coordinates(coordinates);

    stream::iter(unique)
        .map(move |coordinate| async move {
            let result = source
                .latest_version(&coordinate)
                .await
                .map(|latest| UpgradeNotice::compare(&coordinate, &latest));
            FreshnessOutcome { coordinate, result }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

/// Upgrade notices for `coordinates`. Coordinates that cannot be checked
/// are logged at debug level and skipped.
pub async fn check_freshness<I>(
    source: &dyn MetadataSource,
    coordinates: I,
    concurrency: usize,
) -> Vec<UpgradeNotice>
where
    I: IntoIterator<Item = DependencyCoordinate>,
{
    let mut notices = Vec::new();
    for outcome in scan(source, coordinates, concurrency).await {
        match outcome.result {
            Ok(Some(notice)) => notices.push(notice),
            Ok(None) => {}
            Err(e) => debug!(
                "Unable to check {} via {}: {}",
                outcome.coordinate,
                source.name(),
                e
            ),
        }
    }
    notices
}

/// `UPGRADE {"group": "...", "name": "...", "current": "...", "latest": "..."}`
pub fn format_upgrade_line(notice: &UpgradeNotice) -> String {
    let quote = |s: &str| serde_json::Value::String(s.to_string()).to_string();
    format!(
        "UPGRADE {{\"group\": {}, \"name\": {}, \"current\": {}, \"latest\": {}}}",
        quote(&notice.group),
        quote(&notice.name),
        quote(&notice.current),
        quote(&notice.latest)
    )
}
