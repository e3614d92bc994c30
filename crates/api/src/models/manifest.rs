use serde::{Deserialize, Serialize};

/// Attributes written to `META-INF/MANIFEST.MF` of an assembled archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JarManifest {
    pub implementation_title: Option<String>,
    pub implementation_version: Option<String>,
    pub main_class: Option<String>,
    pub enable_native_access: Option<String>,
}

impl JarManifest {
    /// Attribute name/value pairs in output order.
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        let mut attrs = vec![("Manifest-Version", "1.0")];
        let optional = [
            ("Implementation-Title", &self.implementation_title),
            ("Implementation-Version", &self.implementation_version),
            ("Main-Class", &self.main_class),
            ("Enable-Native-Access", &self.enable_native_access),
        ];
        for (name, value) in optional {
            if let Some(value) = value {
                attrs.push((name, value.as_str()));
            }
        }
        attrs
    }
}
