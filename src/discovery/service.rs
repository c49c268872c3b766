//! Provider discovery through `META-INF/services/<capability>` resources.
//!
//! Every root of the search path may contribute a provider resource for a
//! capability. Each non-comment line names one provider; names are turned
//! into constructors through a [`ProviderRegistry`]. Failures never abort a
//! discovery: they are logged and returned next to the providers found.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::discovery::registry::{ProviderFactory, ProviderRegistry, UnresolvedReason};
use crate::resource::{ClassPath, ResourceConfig, ResourceLoader, ResourceLocation};

/// A capability and the provider resources found for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Fully qualified capability name
    pub capability: String,
    /// Resource path searched on every root
    pub resource_path: String,
    /// Provider resources, in enumeration order
    pub locations: Vec<ResourceLocation>,
}

/// One provider name advertised by a provider resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub name: String,
    pub location: ResourceLocation,
    /// 1-based line number within the resource
    pub line: usize,
}

impl fmt::Display for ProviderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.location, self.line)
    }
}

/// A problem met during discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscoveryFailure {
    /// Provider resources could not be enumerated
    Enumeration {
        resource_path: String,
        message: String,
    },
    /// A provider resource was found but could not be read
    Unreadable {
        location: ResourceLocation,
        message: String,
    },
    /// An advertised name did not resolve to a provider
    Unresolvable {
        entry: ProviderEntry,
        reason: UnresolvedReason,
    },
}

impl fmt::Display for DiscoveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enumeration {
                resource_path,
                message,
            } => write!(f, "cannot enumerate {}: {}", resource_path, message),
            Self::Unreadable { location, message } => {
                write!(f, "cannot read {}: {}", location, message)
            }
            Self::Unresolvable { entry, reason } => write!(f, "{}: {}", entry, reason),
        }
    }
}

/// Provider names found for a capability, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub descriptor: ServiceDescriptor,
    pub entries: Vec<ProviderEntry>,
    pub failures: Vec<DiscoveryFailure>,
}

/// A resolved provider.
pub struct ProviderHandle<T: ?Sized> {
    entry: ProviderEntry,
    factory: ProviderFactory<T>,
}

impl<T: ?Sized> ProviderHandle<T> {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Where this provider was advertised.
    pub fn entry(&self) -> &ProviderEntry {
        &self.entry
    }

    /// Construct a new provider instance.
    pub fn instantiate(&self) -> Box<T> {
        (self.factory)()
    }
}

impl<T: ?Sized> Clone for ProviderHandle<T> {
    fn clone(&self) -> Self {
        Self {
            entry: self.entry.clone(),
            factory: self.factory.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for ProviderHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderHandle")
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

/// Outcome of resolving a capability's providers.
pub struct Discovery<T: ?Sized> {
    pub descriptor: ServiceDescriptor,
    /// Resolved providers, in encounter order
    pub providers: Vec<ProviderHandle<T>>,
    pub failures: Vec<DiscoveryFailure>,
}

impl<T: ?Sized> fmt::Debug for Discovery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Discovery")
            .field("descriptor", &self.descriptor)
            .field("providers", &self.providers)
            .field("failures", &self.failures)
            .finish()
    }
}

impl<T: ?Sized> Discovery<T> {
    /// True when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(ProviderHandle::name).collect()
    }

    pub fn instantiate_all(&self) -> Vec<Box<T>> {
        self.providers.iter().map(ProviderHandle::instantiate).collect()
    }
}

/// Finds the providers advertised for a capability.
///
/// Holds no state between calls; each query enumerates resources afresh.
/// Result order follows the loader's enumeration order, then line order.
pub struct ProviderDiscovery<L> {
    loader: L,
    prefix: String,
}

impl ProviderDiscovery<ClassPath> {
    /// Create a discovery over the configured search path.
    pub fn from_config(config: &ResourceConfig) -> Self {
        Self::new(ClassPath::from_config(config)).with_prefix(&config.services_prefix)
    }
}

impl<L: ResourceLoader> ProviderDiscovery<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            prefix: defaults::SERVICES_PREFIX.to_string(),
        }
    }

    /// Use a different namespace than `META-INF/services/`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Resource path of the provider resources for `capability`.
    pub fn resource_path(&self, capability: &str) -> String {
        if self.prefix.is_empty() || self.prefix.ends_with('/') {
            format!("{}{}", self.prefix, capability)
        } else {
            format!("{}/{}", self.prefix, capability)
        }
    }

    /// Collect the provider names advertised for `capability`.
    ///
    /// An I/O failure stops the scan; entries read before it are kept.
    pub fn scan(&self, capability: &str) -> ScanReport {
        let resource_path = self.resource_path(capability);
        let mut report = ScanReport {
            descriptor: ServiceDescriptor {
                capability: capability.to_string(),
                resource_path: resource_path.clone(),
                locations: Vec::new(),
            },
            entries: Vec::new(),
            failures: Vec::new(),
        };

        let locations = match self.loader.locate_all(&resource_path) {
            Ok(locations) => locations,
            Err(e) => {
                log::warn!("Error while loading provider files {}: {}", resource_path, e);
                report.failures.push(DiscoveryFailure::Enumeration {
                    resource_path,
                    message: e.to_string(),
                });
                return report;
            }
        };
        report.descriptor.locations = locations.clone();

        for location in locations {
            let bytes = match self.loader.read(&location) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Error while reading provider file {}: {}", location, e);
                    report.failures.push(DiscoveryFailure::Unreadable {
                        location,
                        message: e.to_string(),
                    });
                    return report;
                }
            };

            let text = String::from_utf8_lossy(&bytes);
            report.entries.extend(provider_lines(&text).map(|(line, name)| ProviderEntry {
                name: name.to_string(),
                location: location.clone(),
                line,
            }));
        }

        log::debug!(
            "Found {} provider entries for {} in {} resources",
            report.entries.len(),
            capability,
            report.descriptor.locations.len()
        );
        report
    }

    /// Resolve every provider advertised for the registry's capability.
    pub fn find_providers<T: ?Sized>(&self, registry: &ProviderRegistry<T>) -> Discovery<T> {
        let ScanReport {
            descriptor,
            entries,
            mut failures,
        } = self.scan(registry.capability());

        let mut providers = Vec::with_capacity(entries.len());
        for entry in entries {
            match registry.resolve(&entry.name) {
                Ok(factory) => providers.push(ProviderHandle { entry, factory }),
                Err(reason) => {
                    log::error!("Could not load service provider: {} ({})", entry, reason);
                    failures.push(DiscoveryFailure::Unresolvable { entry, reason });
                }
            }
        }

        Discovery {
            descriptor,
            providers,
            failures,
        }
    }
}

/// Provider names of a resource with their 1-based line numbers.
///
/// Text after `#` is a comment; surrounding whitespace is ignored and lines
/// left empty are skipped.
fn provider_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines().enumerate().filter_map(|(index, line)| {
        let name = line.split('#').next().unwrap_or_default().trim();
        (!name.is_empty()).then_some((index + 1, name))
    })
}
