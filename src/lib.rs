//! Scoped resources - per-scope properties and provider discovery.
//!
//! Two independent lookups over an ordered resource search path:
//!
//! - [`PropertyResolver`] reads `<namespace>/<SimpleName>.properties` for a
//!   [`Scope`] once, caches the table and answers string and integer queries.
//! - [`ProviderDiscovery`] reads every `META-INF/services/<capability>`
//!   resource and resolves the advertised names through a
//!   [`ProviderRegistry`].

mod defaults;
pub mod error;

pub mod discovery;
pub mod properties;
pub mod resource;
pub mod version;

pub use error::{Error, Result};

pub use resource::{ClassPath, MemoryResources, ResourceConfig, ResourceLoader, ResourceLocation};

pub use properties::{
    PropertiesParseError, PropertyCache, PropertyResolver, PropertyTable, Scope,
    SharedPropertyResolver,
};

pub use discovery::{
    Discovery, DiscoveryFailure, ProviderDiscovery, ProviderEntry, ProviderFactory,
    ProviderHandle, ProviderRegistry, ScanReport, ServiceDescriptor, UnresolvedReason,
};

pub use version::{build_info, BuildInfo, VERSION};
