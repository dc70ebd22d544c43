//! Federation manifest handling: model, sources, and the resolver.

pub mod resolver;
pub mod source;
pub mod types;

pub use resolver::{FederationService, ResolvePhase};
pub use source::{FileManifestSource, HttpDiscoverySource, ManifestSource};
pub use types::{
    FederationManifest, MenuItemOverrides, ModuleStatus, NavigationMetadata, RemoteDescriptor,
    RemoteMetadata, RouteDeclaration,
};
