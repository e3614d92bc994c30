mod assemble;
mod cache;
mod check;
mod native;
mod transform;

use clap::{Parser, Subcommand};
use jarsmith_core::config::{DEFAULT_CONFIG_FILE, JarsmithConfig};
use std::path::PathBuf;

pub use assemble::AssembleArgs;
pub use cache::CacheCommands;
pub use check::CheckArgs;
pub use native::NativeArgs;

#[derive(Parser)]
#[command(
    name = "jarsmith",
    version,
    about = "Curate JVM dependency archives and package them as fat jars or native images",
    long_about = "jarsmith strips unwanted entries from dependency jars, merges a resolved classpath \
                  into one self-contained archive, drives the GraalVM native-image compiler, and \
                  audits declared dependencies for newer published versions."
)]
pub struct Cli {
    /// Configuration file
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drop configured entries from dependency archives
    #[command(
        long_about = "Applies the first exclusion rule whose prefix matches each artifact's file name. \
                      Rewritten archives are cached under ~/.jarsmith/transforms unless --output-dir \
                      is given. Prints one resulting path per input."
    )]
    Transform {
        /// Archives to transform
        #[arg(value_name = "ARTIFACT", required = true)]
        artifacts: Vec<PathBuf>,
        /// Write rewritten archives here instead of the cache
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Merge a classpath into one fat jar
    Assemble(AssembleArgs),
    /// Compile a classpath into a native executable with GraalVM
    #[command(
        long_about = "Resolves native-image from GRAALVM_HOME or JAVA_HOME and runs it with the \
                      given configuration files. The compiler's exit status becomes jarsmith's."
    )]
    NativeImage(NativeArgs),
    /// Report dependencies with a newer published version
    #[command(
        long_about = "Collects coordinates from a Gradle project, the Gradle module cache, or the command \
                      line, and prints one UPGRADE line per outdated dependency. Lookup failures are \
                      logged and skipped."
    )]
    CheckVersions(CheckArgs),
    /// Inspect or clear the transform cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

impl Commands {
    fn component(&self) -> &'static str {
        match self {
            Commands::Transform { .. } => "transform",
            Commands::Assemble(_) => "assemble",
            Commands::NativeImage(_) => "native-image",
            Commands::CheckVersions(_) => "check-versions",
            Commands::Cache(_) => "cache",
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = JarsmithConfig::load(&cli.config)?;
    let _guard = jarsmith_core::logging::init_logging(cli.command.component(), &config.logging);

    match cli.command {
        Commands::Transform {
            artifacts,
            output_dir,
        } => transform::run(&config, &artifacts, output_dir),
        Commands::Assemble(args) => assemble::run(&config, args),
        Commands::NativeImage(args) => native::run(&config, args),
        Commands::CheckVersions(args) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(check::run(&config, args))
        }
        Commands::Cache(cmd) => cache::run(&config, cmd),
    }
}
