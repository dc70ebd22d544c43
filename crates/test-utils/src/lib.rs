//! Portico test utilities.
//!
//! Fixture builders for federation manifest JSON documents, shaped the way
//! remote deployments publish them.

use serde_json::{Value as JsonValue, json};

/// Create a test remote with default values.
///
/// Defaults: visible in menu and sidebar, stable, base path `/{name}`,
/// display name capitalized from the name, no menu-item overrides and no
/// route declarations.
pub fn test_remote(name: &str) -> TestRemote {
    TestRemote {
        name: name.to_string(),
        url: format!("https://remotes.example.com/{name}/remoteEntry.json"),
        fallback_url: None,
        version: "1.0.0".to_string(),
        display_name: capitalize(name),
        description: format!("{name} remote module"),
        icon: name.to_string(),
        base_path: format!("/{name}"),
        show_in_menu: true,
        show_in_sidebar: true,
        category: None,
        status: "stable".to_string(),
        label: None,
        menu_icon: None,
        order: None,
        parent: None,
        badge: None,
        permissions: None,
        visible: None,
        divider_after: None,
        routes: Vec::new(),
    }
}

/// Build a manifest document from a set of test remotes.
pub fn manifest_json(remotes: Vec<TestRemote>) -> JsonValue {
    let mut map = serde_json::Map::new();
    for remote in remotes {
        map.insert(remote.name.clone(), remote.into_json());
    }
    json!({ "remotes": map })
}

/// A test remote builder for creating manifest fixtures.
#[derive(Debug, Clone)]
pub struct TestRemote {
    pub name: String,
    pub url: String,
    pub fallback_url: Option<String>,
    pub version: String,
    pub display_name: String,
    pub description: String,
    pub icon: String,
    pub base_path: String,
    pub show_in_menu: bool,
    pub show_in_sidebar: bool,
    pub category: Option<String>,
    pub status: String,
    label: Option<String>,
    menu_icon: Option<String>,
    order: Option<i32>,
    parent: Option<String>,
    badge: Option<String>,
    permissions: Option<Vec<String>>,
    visible: Option<bool>,
    divider_after: Option<bool>,
    routes: Vec<(String, Option<String>)>,
}

impl TestRemote {
    /// Set the load URL.
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// Set the fallback load URL.
    pub fn with_fallback_url(mut self, url: &str) -> Self {
        self.fallback_url = Some(url.to_string());
        self
    }

    /// Set the navigation base path.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.to_string();
        self
    }

    /// Set the navigation category.
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Hide the remote from the sidebar.
    pub fn not_in_sidebar(mut self) -> Self {
        self.show_in_sidebar = false;
        self
    }

    /// Override the menu label.
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Override the menu icon.
    pub fn with_menu_icon(mut self, icon: &str) -> Self {
        self.menu_icon = Some(icon.to_string());
        self
    }

    /// Set the menu sort order.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Nest under another remote's menu item.
    pub fn with_parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    /// Set the menu badge.
    pub fn with_badge(mut self, badge: &str) -> Self {
        self.badge = Some(badge.to_string());
        self
    }

    /// Set the menu permissions.
    pub fn with_permissions(mut self, permissions: &[&str]) -> Self {
        self.permissions = Some(permissions.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Set explicit menu visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Render a divider after the menu item.
    pub fn with_divider_after(mut self) -> Self {
        self.divider_after = Some(true);
        self
    }

    /// Declare a route, optionally naming the exposed module.
    pub fn with_route(mut self, path: &str, component: Option<&str>) -> Self {
        self.routes
            .push((path.to_string(), component.map(str::to_string)));
        self
    }

    /// Render the remote as its manifest JSON entry.
    pub fn into_json(self) -> JsonValue {
        let mut metadata = serde_json::Map::new();
        metadata.insert("displayName".to_string(), json!(self.display_name));
        metadata.insert("description".to_string(), json!(self.description));
        metadata.insert("icon".to_string(), json!(self.icon));
        metadata.insert("basePath".to_string(), json!(self.base_path));
        metadata.insert(
            "navigation".to_string(),
            json!({
                "showInMenu": self.show_in_menu,
                "showInSidebar": self.show_in_sidebar,
                "category": self.category,
            }),
        );
        metadata.insert("status".to_string(), json!(self.status));

        let mut menu_item = serde_json::Map::new();
        if let Some(label) = self.label {
            menu_item.insert("label".to_string(), json!(label));
        }
        if let Some(icon) = self.menu_icon {
            menu_item.insert("icon".to_string(), json!(icon));
        }
        if let Some(order) = self.order {
            menu_item.insert("order".to_string(), json!(order));
        }
        if let Some(parent) = self.parent {
            menu_item.insert("parent".to_string(), json!(parent));
        }
        if let Some(badge) = self.badge {
            menu_item.insert("badge".to_string(), json!(badge));
        }
        if let Some(permissions) = self.permissions {
            menu_item.insert("permissions".to_string(), json!(permissions));
        }
        if let Some(visible) = self.visible {
            menu_item.insert("visible".to_string(), json!(visible));
        }
        if let Some(divider_after) = self.divider_after {
            menu_item.insert("dividerAfter".to_string(), json!(divider_after));
        }
        if !menu_item.is_empty() {
            metadata.insert("menuItem".to_string(), JsonValue::Object(menu_item));
        }

        if !self.routes.is_empty() {
            let routes: Vec<JsonValue> = self
                .routes
                .into_iter()
                .map(|(path, component)| match component {
                    Some(component) => json!({ "path": path, "component": component }),
                    None => json!({ "path": path }),
                })
                .collect();
            metadata.insert("routes".to_string(), json!(routes));
        }

        json!({
            "url": self.url,
            "version": self.version,
            "fallbackUrl": self.fallback_url,
            "metadata": metadata,
        })
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
