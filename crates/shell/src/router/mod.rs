//! Host route table, dynamic route registration, and lazy module loading.

pub mod loader;
pub mod registrar;
pub mod table;

pub use loader::{HttpRemoteLoader, LazyModule, LoaderRegistry, RemoteLoader, RemoteModule};
pub use registrar::{DEFAULT_EXPOSED_MODULE, RouteRegistrar};
pub use table::{
    RouteEntry, RouteMatch, RouteTable, RouteTarget, WILDCARD_PATH, default_route_table,
    normalize_path,
};
