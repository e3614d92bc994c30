use clap::Args;
use jarsmith_api::DependencyCoordinate;
use jarsmith_core::config::JarsmithConfig;
use jarsmith_core::freshness::{HttpMetadataClient, check_freshness, format_upgrade_line};
use jarsmith_gradle::{GradleCacheDiscoverer, collect_coordinates};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct CheckArgs {
    /// Gradle project whose declared dependencies are checked
    #[arg(long, value_name = "DIR")]
    pub project: Option<PathBuf>,
    /// Also check every artifact in the Gradle module cache
    #[arg(long)]
    pub gradle_cache: bool,
    /// Explicit coordinate as group:name:version (repeatable)
    #[arg(long = "coordinate", value_name = "GAV")]
    pub coordinates: Vec<DependencyCoordinate>,
}

impl CheckArgs {
    fn collect(&self) -> Result<BTreeSet<DependencyCoordinate>, Box<dyn std::error::Error>> {
        let mut coordinates: BTreeSet<DependencyCoordinate> =
            self.coordinates.iter().cloned().collect();

        let project = match (&self.project, self.gradle_cache, coordinates.is_empty()) {
            (Some(dir), _, _) => Some(dir.clone()),
            // nothing else requested: check the current directory
            (None, false, true) => Some(std::env::current_dir()?),
            _ => None,
        };
        if let Some(dir) = project {
            coordinates.extend(collect_coordinates(&dir)?);
        }
        if self.gradle_cache {
            coordinates.extend(GradleCacheDiscoverer::new().coordinates());
        }
        Ok(coordinates)
    }
}

pub async fn run(config: &JarsmithConfig, args: CheckArgs) -> Result<(), Box<dyn std::error::Error>> {
    let coordinates = args.collect()?;
    info!(
        "Checking {} dependencies against {}",
        coordinates.len(),
        config.registry_url
    );

    let client = HttpMetadataClient::new(&config.registry_url, config.request_timeout())?;
    let mut notices = check_freshness(&client, coordinates, config.concurrency).await;
    notices.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));

    for notice in &notices {
        println!("{}", format_upgrade_line(notice));
    }
    Ok(())
}
