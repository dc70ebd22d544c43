//! Route registrar: wires remote route declarations into the host table.
//!
//! Registration is effective at most once per process. The guard is an
//! atomic check-and-set rather than a plain flag because the host runtime is
//! multi-threaded and registration may be triggered from concurrent resolve
//! calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use crate::federation::types::FederationManifest;
use crate::router::table::{RouteEntry, RouteTable, RouteTarget, normalize_path};

/// Exposed module identifier used when a route declaration names none.
pub const DEFAULT_EXPOSED_MODULE: &str = "./routes";

/// Merges manifest-derived routes into the host table, at most once.
pub struct RouteRegistrar {
    table: Arc<RouteTable>,
    registered: AtomicBool,
}

impl RouteRegistrar {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            registered: AtomicBool::new(false),
        }
    }

    /// Whether a registration pass has already run.
    pub fn is_registered(&self) -> bool {
        self.registered.load(Ordering::SeqCst)
    }

    /// Derive route entries from the manifest and merge them into the table
    /// before the wildcard entry. Calls after the first are no-ops.
    ///
    /// Registration only builds lazy descriptors; a bad exposed-module
    /// reference surfaces at navigation time, not here.
    pub fn register(&self, manifest: &FederationManifest) {
        if self
            .registered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("remote routes already registered, skipping");
            return;
        }

        let entries = derive_entries(manifest);
        info!(routes = entries.len(), "registering remote routes");
        self.table.merge_before_wildcard(entries);
    }
}

/// One lazy entry per declared route, in remote encounter order.
///
/// Declared paths lose exactly one leading slash; a remote without route
/// declarations contributes nothing.
pub fn derive_entries(manifest: &FederationManifest) -> Vec<RouteEntry> {
    let mut entries = Vec::new();

    for (name, remote) in &manifest.remotes {
        let Some(routes) = &remote.metadata.routes else {
            continue;
        };

        for route in routes {
            entries.push(RouteEntry {
                path: normalize_path(&route.path).to_string(),
                target: RouteTarget::Lazy {
                    remote: name.clone(),
                    module: route
                        .component
                        .clone()
                        .unwrap_or_else(|| DEFAULT_EXPOSED_MODULE.to_string()),
                },
            });
        }
    }

    entries
}
