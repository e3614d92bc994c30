use crate::error::{JarsmithError, Result};
use jarsmith_api::{DEFAULT_PROTOCOLS, NativeImageConfig};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Compiler flags passed on every build, ahead of the protocol list:
/// no fallback image, tolerate an incomplete classpath, report unsupported
/// elements at run time.
pub const FIXED_FLAGS: &[&str] = &[
    "--no-fallback",
    "--allow-incomplete-classpath",
    "--report-unsupported-elements-at-runtime",
];

pub const SECURITY_FLAG: &str = "--enable-all-security-services";

/// Kind of dynamic-behavior configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigKind {
    Reflection,
    Jni,
    DynamicProxy,
    Resource,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 4] = [
        ConfigKind::Reflection,
        ConfigKind::Jni,
        ConfigKind::DynamicProxy,
        ConfigKind::Resource,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            ConfigKind::Reflection => "-H:ReflectionConfigurationFiles=",
            ConfigKind::Jni => "-H:JNIConfigurationFiles=",
            ConfigKind::DynamicProxy => "-H:DynamicProxyConfigurationFiles=",
            ConfigKind::Resource => "-H:ResourceConfigurationFiles=",
        }
    }

    /// Conventional file name under `META-INF/native-image/`
    pub fn file_name(self) -> &'static str {
        match self {
            ConfigKind::Reflection => "reflect-config.json",
            ConfigKind::Jni => "jni-config.json",
            ConfigKind::DynamicProxy => "proxy-config.json",
            ConfigKind::Resource => "resource-config.json",
        }
    }
}

/// The full `native-image` argument list as a value.
///
/// Built from a [`NativeImageConfig`]; rendering is pure so the command line
/// can be inspected without spawning anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeImageArgs {
    pub output_dir: PathBuf,
    pub binary_name: String,
    pub config_files: Vec<(ConfigKind, PathBuf)>,
    pub protocols: Vec<String>,
    pub feature_flags: BTreeSet<String>,
    pub extra_args: Vec<String>,
    pub classpath: Vec<PathBuf>,
    pub entry_point: String,
}

impl NativeImageArgs {
    pub fn from_config(config: &NativeImageConfig) -> Result<Self> {
        if config.binary_name.trim().is_empty() {
            return Err(JarsmithError::Configuration(
                "native image binary name is empty".to_string(),
            ));
        }
        if config.entry_point.trim().is_empty() {
            return Err(JarsmithError::Configuration(
                "native image entry point is empty".to_string(),
            ));
        }

        let config_files = [
            (ConfigKind::Reflection, &config.reflect_config),
            (ConfigKind::Jni, &config.jni_config),
            (ConfigKind::DynamicProxy, &config.proxy_config),
            (ConfigKind::Resource, &config.resource_config),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.clone().map(|p| (kind, p)))
        .collect();

        let protocols = if config.enabled_protocols.is_empty() {
            DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect()
        } else {
            config.enabled_protocols.clone()
        };

        Ok(Self {
            output_dir: config.output_dir.clone(),
            binary_name: config.binary_name.clone(),
            config_files,
            protocols,
            feature_flags: config.feature_flags.clone(),
            extra_args: config.extra_args.clone(),
            classpath: config.classpath.clone(),
            entry_point: config.entry_point.clone(),
        })
    }

    pub fn to_args(&self) -> Result<Vec<OsString>> {
        let mut args: Vec<OsString> = Vec::new();

        args.push(prefixed("-H:Path=", &self.output_dir));
        args.push(format!("-H:Name={}", self.binary_name).into());

        for (kind, path) in &self.config_files {
            args.push(prefixed(kind.flag(), path));
        }

        args.extend(FIXED_FLAGS.iter().map(OsString::from));
        args.push(format!("--enable-url-protocols={}", self.protocols.join(",")).into());
        args.push(SECURITY_FLAG.into());
        args.extend(self.feature_flags.iter().map(OsString::from));
        args.extend(self.extra_args.iter().map(OsString::from));

        if !self.classpath.is_empty() {
            let joined = std::env::join_paths(&self.classpath).map_err(|e| {
                JarsmithError::Configuration(format!("classpath cannot be joined: {}", e))
            })?;
            args.push("-cp".into());
            args.push(joined);
        }

        args.push(self.entry_point.clone().into());
        Ok(args)
    }
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

/// Fill unset configuration paths from `<dir>/META-INF/native-image/`.
pub fn discover_config_files(config: &mut NativeImageConfig, dir: &Path) {
    let base = dir.join("META-INF").join("native-image");
    for kind in ConfigKind::ALL {
        let slot = match kind {
            ConfigKind::Reflection => &mut config.reflect_config,
            ConfigKind::Jni => &mut config.jni_config,
            ConfigKind::DynamicProxy => &mut config.proxy_config,
            ConfigKind::Resource => &mut config.resource_config,
        };
        if slot.is_none() {
            let candidate = base.join(kind.file_name());
            if candidate.is_file() {
                *slot = Some(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NativeImageConfig {
        NativeImageConfig {
            output_dir: PathBuf::from("build/native"),
            binary_name: "signal-cli".to_string(),
            reflect_config: Some(PathBuf::from("cfg/reflect-config.json")),
            jni_config: None,
            proxy_config: Some(PathBuf::from("cfg/proxy-config.json")),
            resource_config: None,
            feature_flags: ["--verbose".to_string()].into_iter().collect(),
            classpath: vec![PathBuf::from("a.jar"), PathBuf::from("b.jar")],
            entry_point: "org.asamk.signal.Main".to_string(),
            extra_args: vec!["-march=compatibility".to_string()],
            enabled_protocols: Vec::new(),
        }
    }

    fn rendered(args: &NativeImageArgs) -> Vec<String> {
        args.to_args()
            .unwrap()
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_render_order() {
        let args = NativeImageArgs::from_config(&config()).unwrap();
        let rendered = rendered(&args);
        let cp = std::env::join_paths(["a.jar", "b.jar"]).unwrap();

        assert_eq!(
            rendered,
            vec![
                "-H:Path=build/native".to_string(),
                "-H:Name=signal-cli".to_string(),
                "-H:ReflectionConfigurationFiles=cfg/reflect-config.json".to_string(),
                "-H:DynamicProxyConfigurationFiles=cfg/proxy-config.json".to_string(),
                "--no-fallback".to_string(),
                "--allow-incomplete-classpath".to_string(),
                "--report-unsupported-elements-at-runtime".to_string(),
                "--enable-url-protocols=http,https".to_string(),
                "--enable-all-security-services".to_string(),
                "--verbose".to_string(),
                "-march=compatibility".to_string(),
                "-cp".to_string(),
                cp.to_string_lossy().into_owned(),
                "org.asamk.signal.Main".to_string(),
            ]
        );
    }

    #[test]
    fn test_one_flag_per_supplied_config() {
        let mut cfg = config();
        cfg.jni_config = Some(PathBuf::from("j.json"));
        cfg.resource_config = Some(PathBuf::from("r.json"));
        let rendered = rendered(&NativeImageArgs::from_config(&cfg).unwrap());

        for kind in ConfigKind::ALL {
            assert_eq!(
                rendered.iter().filter(|a| a.starts_with(kind.flag())).count(),
                1
            );
        }
    }

    #[test]
    fn test_custom_protocols() {
        let mut cfg = config();
        cfg.enabled_protocols = vec!["https".to_string()];
        let rendered = rendered(&NativeImageArgs::from_config(&cfg).unwrap());
        assert!(rendered.contains(&"--enable-url-protocols=https".to_string()));
    }

    #[test]
    fn test_empty_entry_point_rejected() {
        let mut cfg = config();
        cfg.entry_point = String::new();
        let err = NativeImageArgs::from_config(&cfg).unwrap_err();
        assert!(matches!(err, JarsmithError::Configuration(_)));
    }

    #[test]
    fn test_discover_config_files() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("META-INF/native-image");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("reflect-config.json"), "[]").unwrap();
        std::fs::write(dir.join("jni-config.json"), "[]").unwrap();

        let mut cfg = config();
        discover_config_files(&mut cfg, temp.path());

        // explicit paths are kept
        assert_eq!(cfg.reflect_config, Some(PathBuf::from("cfg/reflect-config.json")));
        assert_eq!(cfg.jni_config, Some(dir.join("jni-config.json")));
        assert_eq!(cfg.resource_config, None);
    }
}
