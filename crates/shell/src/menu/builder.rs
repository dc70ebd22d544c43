//! Menu tree derivation from the federation manifest.
//!
//! Building is a pure function of the manifest; `MenuService` caches the
//! last built tree and replaces it wholesale on rebuild, so readers always
//! see a complete, sorted tree.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error};

use crate::federation::FederationService;
use crate::federation::types::{FederationManifest, RemoteMetadata};

/// Sort order used when a remote declares none.
pub const DEFAULT_ORDER: i32 = 999;

/// Category used when a remote declares none.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A node in the derived navigation tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Remote name; the tree key.
    pub name: String,
    pub label: String,
    pub icon: String,
    /// Navigation base path, carried verbatim for link hrefs.
    pub base_path: String,
    pub order: i32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub permissions: Vec<String>,
    pub divider_after: bool,
    pub description: String,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub children: Vec<MenuItem>,
}

/// Derive the navigation tree from a manifest.
///
/// Remotes with `showInSidebar` become items; an item whose declared parent
/// exists in the set nests under it, anything else becomes a root. Every
/// level is sorted by ascending `order` with ties keeping encounter order.
pub fn build_tree(manifest: &FederationManifest) -> Vec<MenuItem> {
    let items: Vec<MenuItem> = manifest
        .remotes
        .iter()
        .filter(|(_, remote)| remote.metadata.navigation.show_in_sidebar)
        .map(|(name, remote)| menu_item_for(name, &remote.metadata))
        .collect();

    let names: HashSet<String> = items.iter().map(|item| item.name.clone()).collect();

    // Partition into roots and children of a named parent, in encounter
    // order. An item in a parent group that never attaches to a root (a
    // self- or mutually-referencing parent) drops out of the tree.
    let mut roots = Vec::new();
    let mut children_of: HashMap<String, Vec<MenuItem>> = HashMap::new();
    for item in items {
        match &item.parent {
            Some(parent) if names.contains(parent) => {
                children_of
                    .entry(parent.clone())
                    .or_default()
                    .push(item);
            }
            _ => roots.push(item),
        }
    }

    attach_children(&mut roots, &mut children_of);
    sort_level(&mut roots);
    roots
}

/// Map one remote to its menu item, applying the declared overrides with
/// their documented fallbacks.
fn menu_item_for(name: &str, metadata: &RemoteMetadata) -> MenuItem {
    let overrides = metadata.menu_item.clone().unwrap_or_default();

    MenuItem {
        name: name.to_string(),
        label: overrides
            .label
            .unwrap_or_else(|| metadata.display_name.clone()),
        icon: overrides.icon.unwrap_or_else(|| metadata.icon.clone()),
        base_path: metadata.base_path.clone(),
        order: overrides.order.unwrap_or(DEFAULT_ORDER),
        category: metadata
            .navigation
            .category
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        badge: overrides.badge,
        permissions: overrides.permissions.unwrap_or_default(),
        divider_after: overrides.divider_after.unwrap_or(false),
        description: metadata.description.clone(),
        visible: overrides.visible != Some(false),
        parent: overrides.parent,
        children: Vec::new(),
    }
}

fn attach_children(items: &mut [MenuItem], children_of: &mut HashMap<String, Vec<MenuItem>>) {
    for item in items.iter_mut() {
        let mut children = children_of.remove(&item.name).unwrap_or_default();
        attach_children(&mut children, children_of);
        item.children = children;
    }
}

fn sort_level(items: &mut [MenuItem]) {
    items.sort_by_key(|item| item.order);
    for item in items.iter_mut() {
        sort_level(&mut item.children);
    }
}

/// Holds the current navigation tree, rebuilt from the resolved manifest.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct MenuService {
    inner: Arc<MenuServiceInner>,
}

struct MenuServiceInner {
    federation: FederationService,
    tree: RwLock<Vec<MenuItem>>,
    built: AtomicBool,
}

impl MenuService {
    pub fn new(federation: FederationService) -> Self {
        Self {
            inner: Arc::new(MenuServiceInner {
                federation,
                tree: RwLock::new(Vec::new()),
                built: AtomicBool::new(false),
            }),
        }
    }

    /// Resolve the manifest and build the tree, once.
    ///
    /// A failed resolution is logged and leaves the tree empty; the next
    /// call tries again.
    pub async fn initialize(&self) {
        if self.inner.built.load(Ordering::SeqCst) {
            return;
        }

        match self.inner.federation.resolve().await {
            Ok(manifest) => {
                self.rebuild(&manifest);
                self.inner.built.store(true, Ordering::SeqCst);
            }
            Err(e) => {
                error!(error = %e, "failed to resolve manifest while building menu");
            }
        }
    }

    /// Recompute the tree from a manifest, replacing the previous tree
    /// wholesale.
    pub fn rebuild(&self, manifest: &FederationManifest) {
        let tree = build_tree(manifest);
        debug!(roots = tree.len(), "menu tree rebuilt");
        *self.inner.tree.write() = tree;
    }

    /// Snapshot of the current tree roots, in sorted order.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.inner.tree.read().clone()
    }

    /// Distinct categories across top-level items, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let tree = self.inner.tree.read();
        let mut categories: Vec<String> = Vec::new();
        for item in tree.iter() {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }

    /// Top-level items belonging to one category, in sorted order.
    pub fn items_by_category(&self, category: &str) -> Vec<MenuItem> {
        self.inner
            .tree
            .read()
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use portico_test_utils::{manifest_json, test_remote};

    use super::*;

    fn manifest(value: serde_json::Value) -> FederationManifest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn sidebar_flag_filters_remotes() {
        let manifest = manifest(manifest_json(vec![
            test_remote("reports"),
            test_remote("hidden").not_in_sidebar(),
        ]));

        let tree = build_tree(&manifest);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "reports");
    }

    #[test]
    fn defaults_fall_back_to_top_level_metadata() {
        let manifest = manifest(manifest_json(vec![test_remote("reports")]));

        let tree = build_tree(&manifest);
        let item = &tree[0];
        assert_eq!(item.label, "Reports");
        assert_eq!(item.icon, "reports");
        assert_eq!(item.base_path, "/reports");
        assert_eq!(item.order, DEFAULT_ORDER);
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert!(item.badge.is_none());
        assert!(item.permissions.is_empty());
        assert!(!item.divider_after);
        assert!(item.visible);
        assert!(item.parent.is_none());
        assert!(item.children.is_empty());
    }

    #[test]
    fn overrides_win_over_metadata() {
        let manifest = manifest(manifest_json(vec![
            test_remote("reports")
                .with_label("Reporting")
                .with_menu_icon("chart-line")
                .with_order(5)
                .with_badge("beta")
                .with_permissions(&["reports.view"])
                .with_divider_after(),
        ]));

        let item = &build_tree(&manifest)[0];
        assert_eq!(item.label, "Reporting");
        assert_eq!(item.icon, "chart-line");
        assert_eq!(item.order, 5);
        assert_eq!(item.badge.as_deref(), Some("beta"));
        assert_eq!(item.permissions, ["reports.view"]);
        assert!(item.divider_after);
    }

    #[test]
    fn explicit_zero_order_is_kept() {
        let manifest = manifest(manifest_json(vec![test_remote("reports").with_order(0)]));
        assert_eq!(build_tree(&manifest)[0].order, 0);
    }

    #[test]
    fn visible_only_when_not_explicitly_false() {
        let manifest = manifest(manifest_json(vec![
            test_remote("shown").with_visible(true),
            test_remote("hidden").with_visible(false),
            test_remote("unspecified"),
        ]));

        let tree = build_tree(&manifest);
        for item in &tree {
            let expected = item.name != "hidden";
            assert_eq!(item.visible, expected, "item {}", item.name);
        }
    }

    #[test]
    fn children_nest_under_existing_parent() {
        let manifest = manifest(manifest_json(vec![
            test_remote("finance").with_order(1),
            test_remote("billing").with_parent("finance").with_order(2),
            test_remote("invoices").with_parent("finance").with_order(1),
        ]));

        let tree = build_tree(&manifest);
        assert_eq!(tree.len(), 1);
        let finance = &tree[0];
        assert_eq!(finance.children.len(), 2);
        // Children are sorted by order at their own level.
        assert_eq!(finance.children[0].name, "invoices");
        assert_eq!(finance.children[1].name, "billing");
    }

    #[test]
    fn orphan_parent_promotes_to_root() {
        let manifest = manifest(manifest_json(vec![
            test_remote("billing").with_parent("no-such-item"),
        ]));

        let tree = build_tree(&manifest);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "billing");
    }

    #[test]
    fn mutual_parents_drop_out_of_the_tree() {
        let manifest = manifest(manifest_json(vec![
            test_remote("a").with_parent("b"),
            test_remote("b").with_parent("a"),
            test_remote("standalone"),
        ]));

        let tree = build_tree(&manifest);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "standalone");
    }

    #[test]
    fn siblings_sort_by_order_with_stable_ties() {
        let manifest = manifest(manifest_json(vec![
            test_remote("zeta").with_order(1),
            test_remote("alpha").with_order(2),
            test_remote("mid1").with_order(2),
            test_remote("mid2").with_order(2),
        ]));

        let tree = build_tree(&manifest);
        let names: Vec<&str> = tree.iter().map(|item| item.name.as_str()).collect();
        // Encounter order is remote-name order; equal orders keep it.
        assert_eq!(names, ["zeta", "alpha", "mid1", "mid2"]);
        let orders: Vec<i32> = tree.iter().map(|item| item.order).collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn deep_levels_are_sorted_too() {
        let manifest = manifest(manifest_json(vec![
            test_remote("root").with_order(1),
            test_remote("child").with_parent("root").with_order(1),
            test_remote("grand2").with_parent("child").with_order(2),
            test_remote("grand1").with_parent("child").with_order(1),
        ]));

        let tree = build_tree(&manifest);
        let grandchildren = &tree[0].children[0].children;
        assert_eq!(grandchildren[0].name, "grand1");
        assert_eq!(grandchildren[1].name, "grand2");
    }

    #[test]
    fn categories_first_seen_over_sorted_roots() {
        let manifest = manifest(manifest_json(vec![
            test_remote("a").with_category("Ops").with_order(2),
            test_remote("b").with_category("Finance").with_order(1),
            test_remote("c").with_category("Ops").with_order(3),
            test_remote("d").with_order(4),
        ]));

        let service = service_with(manifest.clone());
        service.rebuild(&manifest);

        assert_eq!(service.categories(), ["Finance", "Ops", "Other"]);
        let ops = service.items_by_category("Ops");
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].name, "a");
        assert!(service.items_by_category("Unknown").is_empty());
    }

    #[test]
    fn rebuild_replaces_the_tree_wholesale() {
        let first = manifest(manifest_json(vec![test_remote("reports")]));
        let second = manifest(manifest_json(vec![test_remote("billing")]));

        let service = service_with(first.clone());
        service.rebuild(&first);
        assert_eq!(service.menu_items()[0].name, "reports");

        service.rebuild(&second);
        let items = service.menu_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "billing");
    }

    fn service_with(manifest: FederationManifest) -> MenuService {
        use crate::router::{RouteRegistrar, default_route_table};

        let table = Arc::new(default_route_table());
        let registrar = RouteRegistrar::new(table);
        MenuService::new(FederationService::new(vec![], registrar, Some(manifest)))
    }
}
