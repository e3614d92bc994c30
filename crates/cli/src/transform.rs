use jarsmith_core::archive::{ArtifactTransform, TransformCache, TransformOutcome};
use jarsmith_core::config::JarsmithConfig;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

pub fn run(
    config: &JarsmithConfig,
    artifacts: &[PathBuf],
    output_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rules = config.exclusion_rules();
    if rules.is_empty() {
        warn!("No exclusion rules configured; every artifact is passed through unchanged");
    }

    let results: Vec<(PathBuf, jarsmith_core::Result<TransformOutcome>)> = match output_dir {
        Some(dir) => {
            let transform = ArtifactTransform::new(rules);
            artifacts
                .iter()
                .map(|input| (input.clone(), transform.transform(input, &dir)))
                .collect()
        }
        None => TransformCache::new(config.cache_dir(), rules).transform_all(artifacts),
    };

    let mut failed = 0;
    for (input, result) in results {
        match result {
            Ok(outcome) => println!("{}", outcome.path().display()),
            Err(e) => {
                error!("{}: {}", artifact_label(&input), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(format!("{} of {} artifacts failed", failed, artifacts.len()).into());
    }
    Ok(())
}

fn artifact_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
