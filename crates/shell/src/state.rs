//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::federation::{
    FederationManifest, FederationService, FileManifestSource, HttpDiscoverySource, ManifestSource,
};
use crate::menu::{AllowAll, MenuService, PermissionPolicy};
use crate::router::{
    HttpRemoteLoader, LoaderRegistry, RouteRegistrar, RouteTable, default_route_table,
};

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// The live host route table.
    routes: Arc<RouteTable>,

    /// Federation manifest resolver; owns the process-wide manifest slot.
    federation: FederationService,

    /// Navigation tree derived from the resolved manifest.
    menu: MenuService,

    /// Lazy remote module registry.
    loaders: LoaderRegistry,

    /// Permission decision hook for the presentation layer.
    permissions: Arc<dyn PermissionPolicy>,
}

impl AppState {
    /// Wire up the shell services from configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let routes = Arc::new(default_route_table());
        let registrar = RouteRegistrar::new(routes.clone());

        let mut sources: Vec<Box<dyn ManifestSource>> = Vec::new();
        if let Some(url) = &config.discovery_url {
            sources.push(Box::new(HttpDiscoverySource::new(
                url.clone(),
                config.discovery_timeout,
            )));
        }
        sources.push(Box::new(FileManifestSource::new(
            config.manifest_path.clone(),
        )));

        let seed = match &config.seed_manifest_path {
            Some(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("failed to read seed manifest {}", path.display()))?;
                let manifest: FederationManifest = serde_json::from_slice(&bytes)
                    .with_context(|| format!("seed manifest {} is malformed", path.display()))?;
                info!(path = %path.display(), "seed manifest loaded");
                Some(manifest)
            }
            None => None,
        };

        let federation = FederationService::new(sources, registrar, seed);
        let menu = MenuService::new(federation.clone());
        let loaders = LoaderRegistry::new(Arc::new(HttpRemoteLoader::new(
            federation.clone(),
            config.discovery_timeout,
        )));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                routes,
                federation,
                menu,
                loaders,
                permissions: Arc::new(AllowAll),
            }),
        })
    }

    /// Get the live route table.
    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.inner.routes
    }

    /// Get the federation resolver.
    pub fn federation(&self) -> &FederationService {
        &self.inner.federation
    }

    /// Get the menu service.
    pub fn menu(&self) -> &MenuService {
        &self.inner.menu
    }

    /// Get the lazy module registry.
    pub fn loaders(&self) -> &LoaderRegistry {
        &self.inner.loaders
    }

    /// Get the permission policy.
    pub fn permissions(&self) -> &Arc<dyn PermissionPolicy> {
        &self.inner.permissions
    }
}
