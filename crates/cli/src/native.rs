use clap::Args;
use jarsmith_api::NativeImageConfig;
use jarsmith_core::config::JarsmithConfig;
use jarsmith_core::native::{NativeImageArgs, NativeImageDriver, discover_config_files};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Args)]
pub struct NativeArgs {
    /// Classpath elements passed to the compiler
    #[arg(value_name = "CLASSPATH", required = true)]
    pub classpath: Vec<PathBuf>,
    /// Entry point class
    #[arg(long, value_name = "CLASS")]
    pub main_class: String,
    /// Name of the produced executable
    #[arg(long, value_name = "NAME")]
    pub name: String,
    #[arg(long, value_name = "DIR", default_value = "build/native")]
    pub output_dir: PathBuf,
    /// Directory searched for META-INF/native-image/*-config.json
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub reflect_config: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub jni_config: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub proxy_config: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub resource_config: Option<PathBuf>,
    /// Extra compiler flag (repeatable)
    #[arg(long = "feature", value_name = "FLAG", allow_hyphen_values = true)]
    pub features: Vec<String>,
    /// Print the compiler command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

impl NativeArgs {
    pub fn to_config(&self, config: &JarsmithConfig) -> NativeImageConfig {
        let mut native = NativeImageConfig {
            output_dir: self.output_dir.clone(),
            binary_name: self.name.clone(),
            reflect_config: self.reflect_config.clone(),
            jni_config: self.jni_config.clone(),
            proxy_config: self.proxy_config.clone(),
            resource_config: self.resource_config.clone(),
            feature_flags: self.features.iter().cloned().collect(),
            classpath: self.classpath.clone(),
            entry_point: self.main_class.clone(),
            extra_args: config.native_image.extra_args.clone(),
            enabled_protocols: config.native_image.enabled_protocols.clone(),
        };
        if let Some(dir) = &self.config_dir {
            discover_config_files(&mut native, dir);
        }
        native
    }
}

pub fn run(config: &JarsmithConfig, args: NativeArgs) -> Result<(), Box<dyn std::error::Error>> {
    run_with(config, args, |name| std::env::var_os(name))
}

/// Resolve the toolchain through `lookup` before touching any file.
fn run_with<F>(
    config: &JarsmithConfig,
    args: NativeArgs,
    lookup: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: Fn(&str) -> Option<OsString>,
{
    let driver = if args.dry_run {
        None
    } else {
        Some(NativeImageDriver::resolve(lookup)?)
    };
    let native = args.to_config(config);

    let Some(driver) = driver else {
        let rendered: Vec<String> = NativeImageArgs::from_config(&native)?
            .to_args()?
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        println!("native-image {}", rendered.join(" "));
        return Ok(());
    };

    driver.build_checked(&native)?;
    Ok(())
}
