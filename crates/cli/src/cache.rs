use clap::Subcommand;
use jarsmith_api::TransformCacheManager;
use jarsmith_core::archive::TransformCache;
use jarsmith_core::config::JarsmithConfig;
use tabled::{Table, Tabled};

#[derive(Subcommand)]
pub enum CacheCommands {
    /// Show cache statistics
    Stats,
    /// List cached transform outputs
    List {
        /// Sort by size instead of path
        #[arg(long)]
        by_size: bool,
    },
    /// Clear the cache
    Clear,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Artifact")]
    artifact: String,
    #[tabled(rename = "Size")]
    size: String,
}

fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1024.0 / 1024.0)
    }
}

pub fn run(config: &JarsmithConfig, cmd: CacheCommands) -> Result<(), Box<dyn std::error::Error>> {
    let cache: Box<dyn TransformCacheManager> = Box::new(TransformCache::new(
        config.cache_dir(),
        config.exclusion_rules(),
    ));

    match cmd {
        CacheCommands::Stats => {
            let stats = cache.stats();
            println!("Cache Directory: {}", stats.cache_dir.display());
            println!("Total Entries:   {}", stats.total_entries);
            println!("Total Size:      {}", format_size(stats.total_bytes));
        }
        CacheCommands::List { by_size } => {
            let mut entries = cache.scan();
            if by_size {
                entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
            }

            let rows: Vec<EntryRow> = entries
                .into_iter()
                .map(|e| EntryRow {
                    key: e.key,
                    artifact: e
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    size: format_size(e.size_bytes),
                })
                .collect();

            if rows.is_empty() {
                println!("No cached transforms found.");
            } else {
                println!("{}", Table::new(rows));
            }
        }
        CacheCommands::Clear => {
            cache.clear()?;
            println!("Transform cache cleared.");
        }
    }

    Ok(())
}
