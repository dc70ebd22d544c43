//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Federation discovery endpoint. When None, only the static
    /// fallback manifest is consulted.
    pub discovery_url: Option<Url>,

    /// Timeout for the discovery fetch (default: 10 seconds).
    pub discovery_timeout: Duration,

    /// Path to the static fallback manifest
    /// (default: ./federation.manifest.json).
    pub manifest_path: PathBuf,

    /// Optional manifest file preloaded into the resolver slot at startup,
    /// before any source is consulted.
    pub seed_manifest_path: Option<PathBuf>,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let discovery_url: Option<Url> = match env::var("DISCOVERY_URL") {
            Ok(raw) => Some(raw.parse().context("DISCOVERY_URL must be a valid URL")?),
            Err(_) => None,
        };

        let discovery_timeout_secs: u64 = env::var("DISCOVERY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DISCOVERY_TIMEOUT_SECS must be a valid u64")?;

        let manifest_path = env::var("MANIFEST_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./federation.manifest.json"));

        let seed_manifest_path = env::var("MANIFEST_SEED").map(PathBuf::from).ok();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            discovery_url,
            discovery_timeout: Duration::from_secs(discovery_timeout_secs),
            manifest_path,
            seed_manifest_path,
            cors_allowed_origins,
        })
    }
}
