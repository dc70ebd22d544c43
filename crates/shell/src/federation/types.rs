//! Federation manifest model.
//!
//! Pure data types describing remotes, their metadata, menu-item overrides,
//! and route declarations. Field names are camelCase on the wire, matching
//! the manifest documents published by remote deployments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Release maturity declared by a remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Stable,
    Beta,
    Alpha,
    Deprecated,
}

/// Layout hint for a declared route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteLayout {
    Default,
    Minimal,
    Fullscreen,
}

/// Overrides a remote may declare for its derived menu item.
///
/// Every field is optional; absent fields fall back to the remote's
/// top-level metadata (or the documented defaults) when the menu is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemOverrides {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
    /// Name of another remote's menu item to nest under.
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub divider_after: Option<bool>,
}

/// A route declared by a remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDeclaration {
    /// Route path, possibly carrying a leading slash.
    pub path: String,
    /// Exposed module identifier; `./routes` when unspecified.
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub exact: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub layout: Option<RouteLayout>,
}

/// Where a remote wants to surface in the host navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationMetadata {
    pub show_in_menu: bool,
    pub show_in_sidebar: bool,
    #[serde(default)]
    pub show_in_breadcrumb: Option<bool>,
    /// Menu category; items without one land in "Other".
    #[serde(default)]
    pub category: Option<String>,
}

/// Theme hints a remote may publish.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeMetadata {
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    #[serde(default)]
    pub dark_mode: Option<bool>,
}

/// Everything a remote declares about itself beyond its load location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMetadata {
    pub display_name: String,
    pub description: String,
    pub icon: String,
    /// Navigation base path; may or may not carry a leading slash.
    pub base_path: String,
    #[serde(default)]
    pub menu_item: Option<MenuItemOverrides>,
    #[serde(default)]
    pub routes: Option<Vec<RouteDeclaration>>,
    pub navigation: NavigationMetadata,
    #[serde(default)]
    pub theme: Option<ThemeMetadata>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    /// Shared dependency versions, declared only (no negotiation).
    #[serde(default)]
    pub dependencies: Option<BTreeMap<String, String>>,
    pub status: ModuleStatus,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub health_check: Option<String>,
}

/// A remote entry in the manifest, keyed by its unique name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDescriptor {
    /// Load URL for the remote's module bundle.
    pub url: String,
    pub version: String,
    /// Alternate load URL tried when the primary fails.
    #[serde(default)]
    pub fallback_url: Option<String>,
    pub metadata: RemoteMetadata,
}

/// Host-wide settings published alongside the remotes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSettings {
    #[serde(default)]
    pub default_theme: Option<ThemeMetadata>,
    #[serde(default)]
    pub allowed_features: Option<Vec<String>>,
}

/// The federation manifest: the full description of deployed remotes.
///
/// `remotes` is a BTreeMap, so every traversal of the manifest sees remotes
/// in ascending name order; derived ordering guarantees (stable sort ties,
/// first-seen categories) are relative to that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederationManifest {
    pub remotes: BTreeMap<String, RemoteDescriptor>,
    #[serde(default)]
    pub global_settings: Option<GlobalSettings>,
}
