//! Presentation boundary for the navigation menu.
//!
//! The shell does not render; it hands the presentation layer a permission
//! decision hook and per-session expand/collapse state. The real permission
//! rule engine is an external collaborator behind [`PermissionPolicy`].

use std::collections::HashSet;

use crate::menu::builder::MenuItem;

/// Decides whether a menu item may be shown to the current user.
pub trait PermissionPolicy: Send + Sync {
    fn has_permission(&self, item: &MenuItem) -> bool;
}

/// Placeholder policy until a rule engine is wired in.
pub struct AllowAll;

impl PermissionPolicy for AllowAll {
    fn has_permission(&self, _item: &MenuItem) -> bool {
        true
    }
}

/// Expand/collapse state for a rendered menu.
///
/// Item and category toggles are independent sets; everything starts
/// collapsed.
#[derive(Debug, Clone, Default)]
pub struct MenuViewState {
    expanded_items: HashSet<String>,
    expanded_categories: HashSet<String>,
}

impl MenuViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_item(&mut self, name: &str) {
        if !self.expanded_items.remove(name) {
            self.expanded_items.insert(name.to_string());
        }
    }

    pub fn is_item_expanded(&self, name: &str) -> bool {
        self.expanded_items.contains(name)
    }

    pub fn toggle_category(&mut self, name: &str) {
        if !self.expanded_categories.remove(name) {
            self.expanded_categories.insert(name.to_string());
        }
    }

    pub fn is_category_expanded(&self, name: &str) -> bool {
        self.expanded_categories.contains(name)
    }
}

/// Active-link test: the current location is under the item's base path.
pub fn is_active(current_path: &str, item: &MenuItem) -> bool {
    current_path.starts_with(&item.base_path)
}
