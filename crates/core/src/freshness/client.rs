use crate::error::{FetchError, JarsmithError, Result};
use async_trait::async_trait;
use jarsmith_api::{DependencyCoordinate, MetadataSource};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

pub const DEFAULT_REGISTRY_URL: &str = "https://repo1.maven.org/maven2";

/// Reads `maven-metadata.xml` from a Maven-layout HTTP registry.
#[derive(Debug)]
pub struct HttpMetadataClient {
    client: Client,
    base_url: String,
}

impl HttpMetadataClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url).map_err(|e| {
            JarsmithError::Configuration(format!("invalid registry url '{}': {}", base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(JarsmithError::Configuration(format!(
                "registry url '{}' must be http or https",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("jarsmith/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| JarsmithError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `<base>/<group/with/slashes>/<name>/maven-metadata.xml`
    pub fn metadata_url(&self, coordinate: &DependencyCoordinate) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.base_url,
            coordinate.group_path(),
            coordinate.name
        )
    }
}

#[async_trait]
impl MetadataSource for HttpMetadataClient {
    async fn latest_version(
        &self,
        coordinate: &DependencyCoordinate,
    ) -> std::result::Result<String, FetchError> {
        let url = self.metadata_url(coordinate);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Http {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Http {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        parse_latest(&body, &url)
    }

    fn name(&self) -> &str {
        &self.base_url
    }
}

/// Extract `metadata/versioning/latest` from a maven-metadata document.
pub fn parse_latest(xml: &str, url: &str) -> std::result::Result<String, FetchError> {
    let doc = roxmltree::Document::parse(xml).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    doc.root_element()
        .children()
        .find(|n| n.has_tag_name("versioning"))
        .and_then(|versioning| versioning.children().find(|n| n.has_tag_name("latest")))
        .and_then(|latest| latest.text())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FetchError::MissingLatest {
            url: url.to_string(),
        })
}
