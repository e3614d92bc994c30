use crate::error::{JarsmithError, Result};
use crate::native::args::NativeImageArgs;
use crate::native::toolchain::Toolchain;
use jarsmith_api::NativeImageConfig;
use std::ffi::OsString;
use std::process::{Command, ExitStatus};
use tracing::{info, warn};

/// Runs `native-image` from a resolved toolchain.
#[derive(Debug, Clone)]
pub struct NativeImageDriver {
    toolchain: Toolchain,
}

impl NativeImageDriver {
    pub fn new(toolchain: Toolchain) -> Self {
        Self { toolchain }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Toolchain::from_env()?))
    }

    /// Resolve the toolchain through `lookup` instead of the process
    /// environment.
    pub fn resolve<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        Ok(Self::new(Toolchain::resolve(lookup)?))
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// The command that [`build`](Self::build) would run
    pub fn command(&self, config: &NativeImageConfig) -> Result<Command> {
        let args = NativeImageArgs::from_config(config)?.to_args()?;
        let mut command = Command::new(self.toolchain.executable());
        command.args(args);
        Ok(command)
    }

    /// Compile synchronously. The compiler's own output is inherited.
    ///
    /// A non-zero exit status is returned as-is; callers decide whether it
    /// is fatal.
    pub fn build(&self, config: &NativeImageConfig) -> Result<ExitStatus> {
        let mut command = self.command(config)?;
        std::fs::create_dir_all(&config.output_dir)?;

        let rendered: Vec<String> = command
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        info!(
            "Building native image {}: {} {}",
            config.binary_name,
            self.toolchain.executable().display(),
            rendered.join(" ")
        );

        let status = command.status()?;
        if status.success() {
            info!(
                "Native image written to {}",
                config.output_dir.join(&config.binary_name).display()
            );
        } else {
            warn!("native-image exited with {}", status);
        }
        Ok(status)
    }

    /// Like [`build`](Self::build), with a failing compiler mapped to
    /// [`JarsmithError::ExternalProcess`].
    pub fn build_checked(&self, config: &NativeImageConfig) -> Result<()> {
        let status = self.build(config)?;
        if status.success() {
            Ok(())
        } else {
            Err(JarsmithError::ExternalProcess(status))
        }
    }
}
