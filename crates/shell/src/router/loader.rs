//! Lazy remote module loading.
//!
//! The route table only carries {remote, module} descriptors; the code
//! behind them is fetched when a route is actually navigated to. The
//! transport is behind the [`RemoteLoader`] trait — the registry caches
//! whatever the loader produces and hands out deferred [`LazyModule`]
//! factories.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::federation::FederationService;
use crate::federation::types::RouteDeclaration;

/// A module loaded from a remote: the route declarations it exports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteModule {
    #[serde(default)]
    pub routes: Vec<RouteDeclaration>,
}

impl RemoteModule {
    /// Build a module from a raw exports document.
    ///
    /// Route declarations are taken from the requested module key, then the
    /// named `routes` export, then the `default` export; a bare array is
    /// taken as the declarations themselves.
    pub fn from_exports(
        exports: serde_json::Value,
        module: &str,
    ) -> Result<Self, serde_json::Error> {
        let declarations = match exports {
            serde_json::Value::Object(ref map) => map
                .get(module)
                .or_else(|| map.get("routes"))
                .or_else(|| map.get("default"))
                .cloned()
                .unwrap_or_else(|| serde_json::Value::Array(Vec::new())),
            other => other,
        };

        let routes = serde_json::from_value(declarations)?;
        Ok(Self { routes })
    }
}

/// Capability to load a remote module by name. The transport behind it is
/// not this crate's concern.
#[async_trait]
pub trait RemoteLoader: Send + Sync {
    async fn load(&self, remote: &str, module: &str) -> Result<RemoteModule>;
}

/// Registry of lazily loaded remote modules.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct LoaderRegistry {
    inner: Arc<LoaderRegistryInner>,
}

struct LoaderRegistryInner {
    loader: Arc<dyn RemoteLoader>,
    /// Modules already loaded, keyed by (remote, module).
    loaded: DashMap<(String, String), Arc<RemoteModule>>,
}

impl LoaderRegistry {
    pub fn new(loader: Arc<dyn RemoteLoader>) -> Self {
        Self {
            inner: Arc::new(LoaderRegistryInner {
                loader,
                loaded: DashMap::new(),
            }),
        }
    }

    /// Deferred factory for a remote module. Building the factory performs
    /// no I/O; the module is fetched when [`LazyModule::load`] runs.
    pub fn factory(&self, remote: &str, module: &str) -> LazyModule {
        LazyModule {
            registry: self.clone(),
            remote: remote.to_string(),
            module: module.to_string(),
        }
    }

    /// Number of modules loaded so far.
    pub fn loaded_count(&self) -> usize {
        self.inner.loaded.len()
    }

    async fn load(&self, remote: &str, module: &str) -> Result<Arc<RemoteModule>> {
        let key = (remote.to_string(), module.to_string());
        if let Some(cached) = self.inner.loaded.get(&key) {
            return Ok(cached.clone());
        }

        debug!(remote, module, "loading remote module");
        let loaded = Arc::new(self.inner.loader.load(remote, module).await?);
        self.inner.loaded.insert(key, loaded.clone());
        Ok(loaded)
    }
}

/// Zero-argument deferred handle to a remote module.
#[derive(Clone)]
pub struct LazyModule {
    registry: LoaderRegistry,
    remote: String,
    module: String,
}

impl LazyModule {
    pub fn remote(&self) -> &str {
        &self.remote
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Load the module, reusing the registry cache on repeat navigations.
    pub async fn load(&self) -> Result<Arc<RemoteModule>> {
        self.registry.load(&self.remote, &self.module).await
    }
}

/// HTTP loader: fetches a remote's exports document from its manifest URL,
/// falling back to `fallbackUrl` when the primary fails.
pub struct HttpRemoteLoader {
    federation: FederationService,
    client: reqwest::Client,
}

impl HttpRemoteLoader {
    pub fn new(federation: FederationService, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self { federation, client }
    }

    async fn fetch_exports(&self, url: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to fetch remote module from {url}"))?;

        let status = response.status();
        ensure!(status.is_success(), "remote at {url} returned {status}");

        response
            .json()
            .await
            .with_context(|| format!("remote at {url} returned a malformed exports document"))
    }
}

#[async_trait]
impl RemoteLoader for HttpRemoteLoader {
    async fn load(&self, remote: &str, module: &str) -> Result<RemoteModule> {
        let descriptor = self
            .federation
            .manifest()
            .and_then(|m| m.remotes.get(remote).cloned())
            .with_context(|| format!("unknown remote '{remote}'"))?;

        let exports = match self.fetch_exports(&descriptor.url).await {
            Ok(exports) => exports,
            Err(primary) => match &descriptor.fallback_url {
                Some(fallback) => {
                    warn!(remote, error = %primary, "primary remote URL failed, trying fallback");
                    self.fetch_exports(fallback).await?
                }
                None => return Err(primary),
            },
        };

        RemoteModule::from_exports(exports, module)
            .with_context(|| format!("remote '{remote}' exports for {module} are malformed"))
    }
}
