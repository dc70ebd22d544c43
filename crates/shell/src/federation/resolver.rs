//! Federation manifest resolver.
//!
//! Owns the process-wide manifest slot: the manifest is resolved once at
//! startup and reused for the lifetime of the process. Resolution triggers
//! route registration, which the registrar guarantees runs at most once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ManifestError;
use crate::federation::source::ManifestSource;
use crate::federation::types::{FederationManifest, RemoteDescriptor, RemoteMetadata};
use crate::router::RouteRegistrar;

/// Observable resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolvePhase {
    Unresolved,
    Resolving,
    Resolved,
}

/// Resolves the federation manifest and caches it process-wide.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct FederationService {
    inner: Arc<FederationServiceInner>,
}

struct FederationServiceInner {
    /// Sources tried in order on a cache miss.
    sources: Vec<Box<dyn ManifestSource>>,

    /// The process-wide manifest slot. Set once, never torn down.
    manifest: RwLock<Option<Arc<FederationManifest>>>,

    /// Coalesces concurrent resolve calls into one in-flight fetch.
    resolve_lock: tokio::sync::Mutex<()>,

    /// True while a fetch is in flight, so `phase` can report Resolving.
    resolving: AtomicBool,

    /// Registers remote routes on first resolution.
    registrar: RouteRegistrar,
}

impl FederationService {
    /// Create a resolver over the given sources.
    ///
    /// `seed` pre-populates the manifest slot; a seeded service still
    /// registers routes on its first `resolve` call.
    pub fn new(
        sources: Vec<Box<dyn ManifestSource>>,
        registrar: RouteRegistrar,
        seed: Option<FederationManifest>,
    ) -> Self {
        Self {
            inner: Arc::new(FederationServiceInner {
                sources,
                manifest: RwLock::new(seed.map(Arc::new)),
                resolve_lock: tokio::sync::Mutex::new(()),
                resolving: AtomicBool::new(false),
                registrar,
            }),
        }
    }

    /// Resolve the federation manifest.
    ///
    /// Returns the cached manifest when one is present, fetching from the
    /// configured sources otherwise. Route registration is triggered on the
    /// first call that observes a manifest. Fails with
    /// [`ManifestError::Unavailable`] when every source is exhausted; no
    /// route or menu state is mutated in that case.
    pub async fn resolve(&self) -> Result<Arc<FederationManifest>, ManifestError> {
        if let Some(manifest) = self.manifest() {
            // Cached or seeded: make sure registration has run.
            self.inner.registrar.register(&manifest);
            return Ok(manifest);
        }

        let _in_flight = self.inner.resolve_lock.lock().await;

        // A concurrent caller may have resolved while we waited.
        if let Some(manifest) = self.manifest() {
            self.inner.registrar.register(&manifest);
            return Ok(manifest);
        }

        self.inner.resolving.store(true, Ordering::SeqCst);
        let fetched = self.fetch_first().await;
        self.inner.resolving.store(false, Ordering::SeqCst);

        let Some(manifest) = fetched else {
            return Err(ManifestError::Unavailable);
        };

        let manifest = Arc::new(manifest);
        *self.inner.manifest.write() = Some(manifest.clone());
        self.inner.registrar.register(&manifest);

        Ok(manifest)
    }

    /// Try each source in order, returning the first manifest obtained.
    ///
    /// Individual source failures are logged and swallowed here; the caller
    /// escalates total exhaustion.
    async fn fetch_first(&self) -> Option<FederationManifest> {
        for source in &self.inner.sources {
            match source.fetch().await {
                Ok(manifest) => {
                    info!(
                        source = source.name(),
                        remotes = manifest.remotes.len(),
                        "federation manifest resolved"
                    );
                    return Some(manifest);
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "manifest source failed");
                }
            }
        }
        None
    }

    /// Snapshot of the cached manifest, if resolution has completed.
    pub fn manifest(&self) -> Option<Arc<FederationManifest>> {
        self.inner.manifest.read().clone()
    }

    /// Current resolution phase.
    pub fn phase(&self) -> ResolvePhase {
        if self.inner.resolving.load(Ordering::SeqCst) {
            ResolvePhase::Resolving
        } else if self.inner.manifest.read().is_some() {
            ResolvePhase::Resolved
        } else {
            ResolvePhase::Unresolved
        }
    }

    /// Metadata for a single remote, if the manifest is resolved and the
    /// remote exists.
    pub fn remote_metadata(&self, name: &str) -> Option<RemoteMetadata> {
        self.manifest()?.remotes.get(name).map(|r| r.metadata.clone())
    }

    /// All remote descriptors; empty before resolution.
    pub fn all_remotes(&self) -> std::collections::BTreeMap<String, RemoteDescriptor> {
        self.manifest()
            .map(|m| m.remotes.clone())
            .unwrap_or_default()
    }
}
