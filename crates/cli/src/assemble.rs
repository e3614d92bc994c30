use clap::Args;
use jarsmith_api::{ClasspathElement, JarManifest};
use jarsmith_core::archive::{Assembler, EntryFilter, TransformCache};
use jarsmith_core::config::JarsmithConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct AssembleArgs {
    /// Classpath elements (jars or class directories), in precedence order
    #[arg(value_name = "CLASSPATH", required = true)]
    pub classpath: Vec<PathBuf>,
    /// Output archive
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
    /// The program's own archive
    #[arg(long, value_name = "FILE")]
    pub base: Option<PathBuf>,
    /// Additional entry globs to leave out
    #[arg(long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,
    /// Run classpath archives through the configured transforms first
    #[arg(long)]
    pub transform: bool,
    /// Main-Class attribute; overrides the configured manifest
    #[arg(long, value_name = "CLASS")]
    pub main_class: Option<String>,
    /// Implementation-Version attribute; overrides the configured manifest
    #[arg(long, value_name = "VERSION")]
    pub implementation_version: Option<String>,
}

impl AssembleArgs {
    fn manifest(&self, config: &JarsmithConfig) -> Option<JarManifest> {
        let overridden = self.main_class.is_some() || self.implementation_version.is_some();
        if config.manifest.is_none() && !overridden {
            return None;
        }
        let mut manifest = config.manifest.clone().unwrap_or_default();
        if let Some(main_class) = &self.main_class {
            manifest.main_class = Some(main_class.clone());
        }
        if let Some(version) = &self.implementation_version {
            manifest.implementation_version = Some(version.clone());
        }
        Some(manifest)
    }
}

pub fn run(config: &JarsmithConfig, args: AssembleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let paths = if args.transform {
        let cache = TransformCache::new(config.cache_dir(), config.exclusion_rules());
        let mut transformed = Vec::with_capacity(args.classpath.len());
        for (input, result) in cache.transform_all(&args.classpath) {
            // directories are not archives; keep them as they are
            if input.is_dir() {
                transformed.push(input);
            } else {
                transformed.push(result?.into_path());
            }
        }
        transformed
    } else {
        args.classpath.clone()
    };

    let classpath: Vec<ClasspathElement> =
        paths.into_iter().map(ClasspathElement::from_path).collect();

    let mut assembler = Assembler::new()
        .with_filter(EntryFilter::metadata_with(args.excludes.as_slice())?)
        .with_base_precedence(config.base_precedence);
    if let Some(manifest) = args.manifest(config) {
        assembler = assembler.with_manifest(manifest);
    }

    let report = assembler.assemble(&classpath, args.base.as_deref(), &args.output)?;
    info!(
        "{} duplicate entries ignored, {} metadata entries excluded",
        report.duplicates.len(),
        report.excluded
    );
    println!("{}", report.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AssembleArgs {
        AssembleArgs {
            classpath: vec![PathBuf::from("a.jar")],
            output: PathBuf::from("out.jar"),
            base: None,
            excludes: Vec::new(),
            transform: false,
            main_class: None,
            implementation_version: None,
        }
    }

    #[test]
    fn test_no_manifest_without_config_or_flags() {
        assert_eq!(args().manifest(&JarsmithConfig::default()), None);
    }

    #[test]
    fn test_flags_override_configured_manifest() {
        let config = JarsmithConfig {
            manifest: Some(JarManifest {
                implementation_title: Some("signal-cli".to_string()),
                main_class: Some("old.Main".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let mut args = args();
        args.main_class = Some("org.asamk.signal.Main".to_string());

        let manifest = args.manifest(&config).unwrap();
        assert_eq!(manifest.main_class.as_deref(), Some("org.asamk.signal.Main"));
        assert_eq!(manifest.implementation_title.as_deref(), Some("signal-cli"));
    }
}
