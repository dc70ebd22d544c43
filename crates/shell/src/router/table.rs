//! Ordered host route table.
//!
//! The table is an ordered sequence of route entries matched first-to-last.
//! A catch-all wildcard entry (path `**`) matches anything and must remain
//! the final entry across merges; `merge_before_wildcard` preserves that.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

/// Catch-all path token. Always last in a well-formed table.
pub const WILDCARD_PATH: &str = "**";

/// Where a matched route leads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RouteTarget {
    /// A screen the shell itself renders.
    Shell { screen: String },
    /// A remote module loaded on demand at navigation time.
    Lazy { remote: String, module: String },
    /// Catch-all fallback redirect.
    Redirect { to: String },
}

/// One entry in the route table. Paths are stored without a leading slash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub path: String,
    pub target: RouteTarget,
}

impl RouteEntry {
    pub fn is_wildcard(&self) -> bool {
        self.path == WILDCARD_PATH
    }
}

/// Result of matching a path against the table.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route entry.
    pub entry: RouteEntry,
    /// Path parameters extracted (e.g., {"id": "42"})
    pub params: HashMap<String, String>,
}

/// The live router configuration.
///
/// Reads take a snapshot; writes replace the whole ordered sequence, so a
/// reader never observes a partially merged table.
#[derive(Debug)]
pub struct RouteTable {
    entries: RwLock<Vec<RouteEntry>>,
}

impl RouteTable {
    /// Create an empty route table.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Create a table seeded with the given entries.
    pub fn with_entries(entries: Vec<RouteEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Snapshot of the current configuration, in match order.
    pub fn entries(&self) -> Vec<RouteEntry> {
        self.entries.read().clone()
    }

    /// Number of entries in the current configuration.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Replace the active configuration wholesale.
    pub fn replace(&self, entries: Vec<RouteEntry>) {
        *self.entries.write() = entries;
    }

    /// Merge new entries into the configuration, immediately before the
    /// wildcard entry when one exists, at the end otherwise. The swap is a
    /// single write so the old and new configurations are never mixed.
    pub fn merge_before_wildcard(&self, new_entries: Vec<RouteEntry>) {
        let mut entries = self.entries.write();
        let insert_at = entries
            .iter()
            .position(RouteEntry::is_wildcard)
            .unwrap_or(entries.len());

        let mut next = Vec::with_capacity(entries.len() + new_entries.len());
        next.extend_from_slice(&entries[..insert_at]);
        next.extend(new_entries);
        next.extend_from_slice(&entries[insert_at..]);
        *entries = next;
    }

    /// Match a request path against the table, first entry wins.
    ///
    /// The input may carry a leading slash; entry paths never do.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        let path = normalize_path(path);
        for entry in self.entries.read().iter() {
            if entry.is_wildcard() {
                return Some(RouteMatch {
                    entry: entry.clone(),
                    params: HashMap::new(),
                });
            }
            if let Some(params) = match_pattern(&entry.path, path) {
                return Some(RouteMatch {
                    entry: entry.clone(),
                    params,
                });
            }
        }
        None
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// The host's boot configuration: its own shell screen plus the catch-all.
pub fn default_route_table() -> RouteTable {
    RouteTable::with_entries(vec![
        RouteEntry {
            path: String::new(),
            target: RouteTarget::Shell {
                screen: "home".to_string(),
            },
        },
        RouteEntry {
            path: WILDCARD_PATH.to_string(),
            target: RouteTarget::Redirect { to: String::new() },
        },
    ])
}

/// Strip exactly one leading slash, if present.
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Match a route pattern against a path, extracting parameters.
///
/// Pattern: "billing/invoices/:id"
/// Path: "billing/invoices/42"
/// Result: Some({"id": "42"})
fn match_pattern(pattern: &str, path: &str) -> Option<HashMap<String, String>> {
    let pattern_parts: Vec<&str> = pattern.split('/').collect();
    let path_parts: Vec<&str> = path.split('/').collect();

    if pattern_parts.len() != path_parts.len() {
        return None;
    }

    let mut params = HashMap::new();

    for (pat, actual) in pattern_parts.iter().zip(path_parts.iter()) {
        if let Some(param_name) = pat.strip_prefix(':') {
            params.insert(param_name.to_string(), actual.to_string());
        } else if pat != actual {
            return None;
        }
    }

    Some(params)
}
