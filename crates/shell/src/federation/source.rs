//! Manifest sources: where a federation manifest can be obtained from.
//!
//! The resolver tries sources in order. A failing source is logged and
//! skipped, never escalated on its own; only exhausting every source is an
//! error, and that decision belongs to the resolver.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use url::Url;

use crate::error::ManifestError;
use crate::federation::types::FederationManifest;

/// A place a federation manifest can be fetched from.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Short name for log lines.
    fn name(&self) -> &str;

    /// Fetch and parse a manifest document.
    async fn fetch(&self) -> Result<FederationManifest, ManifestError>;
}

/// Discovery endpoint source: GET against a configured URL.
pub struct HttpDiscoverySource {
    url: Url,
    client: reqwest::Client,
}

impl HttpDiscoverySource {
    /// Create a discovery source with the given request timeout.
    pub fn new(url: Url, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            // Disable redirect following to prevent SSRF bypass via 302 to internal IPs
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();

        Self { url, client }
    }
}

#[async_trait]
impl ManifestSource for HttpDiscoverySource {
    fn name(&self) -> &str {
        "discovery"
    }

    async fn fetch(&self) -> Result<FederationManifest, ManifestError> {
        let response = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| ManifestError::FetchFailed(e.into()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ManifestError::FetchFailed(anyhow!(
                "discovery endpoint {} returned {status}",
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ManifestError::FetchFailed(e.into()))?;

        serde_json::from_str(&body).map_err(ManifestError::ParseFailed)
    }
}

/// Static fallback source: a manifest file deployed alongside the shell.
pub struct FileManifestSource {
    path: PathBuf,
}

impl FileManifestSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ManifestSource for FileManifestSource {
    fn name(&self) -> &str {
        "manifest-file"
    }

    async fn fetch(&self) -> Result<FederationManifest, ManifestError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            ManifestError::FetchFailed(anyhow!(
                "failed to read manifest file {}: {e}",
                self.path.display()
            ))
        })?;

        serde_json::from_slice(&bytes).map_err(ManifestError::ParseFailed)
    }
}
