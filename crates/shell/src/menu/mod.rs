//! Navigation menu derivation and presentation boundary.

pub mod builder;
pub mod view;

pub use builder::{DEFAULT_CATEGORY, DEFAULT_ORDER, MenuItem, MenuService, build_tree};
pub use view::{AllowAll, MenuViewState, PermissionPolicy, is_active};
