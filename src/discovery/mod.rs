//! Convention-based provider discovery.

pub mod registry;
pub mod service;

pub use registry::{is_qualified_name, ProviderFactory, ProviderRegistry, UnresolvedReason};
pub use service::{
    Discovery, DiscoveryFailure, ProviderDiscovery, ProviderEntry, ProviderHandle, ScanReport,
    ServiceDescriptor,
};
