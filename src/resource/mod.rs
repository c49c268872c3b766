//! Resource lookup over an ordered search path.
//!
//! A resource is addressed by a relative, `/`-separated path such as
//! `com/foo/Bar.properties` or `META-INF/services/com.foo.Codec`. Loaders
//! search their roots in order; the first root holding a path shadows the
//! rest for single lookups, while enumeration reports every root.

pub mod classpath;
pub mod config;
pub mod memory;

use std::fmt;
use std::io;
use std::path::Component;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use classpath::ClassPath;
pub use config::ResourceConfig;
pub use memory::MemoryResources;

/// Where a resource was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLocation {
    /// Root that holds the resource (a directory or a bundle name)
    pub origin: String,
    /// Relative resource path within the root
    pub path: String,
}

impl ResourceLocation {
    pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!/{}", self.origin, self.path)
    }
}

/// A source of named resources.
pub trait ResourceLoader: Send + Sync {
    /// Every location holding `path`, in search order.
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>>;

    /// The first location holding `path`.
    fn locate(&self, path: &str) -> io::Result<Option<ResourceLocation>> {
        Ok(self.locate_all(path)?.into_iter().next())
    }

    /// Read the full contents of a located resource.
    fn read(&self, location: &ResourceLocation) -> io::Result<Vec<u8>>;
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for Arc<L> {
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>> {
        (**self).locate_all(path)
    }

    fn locate(&self, path: &str) -> io::Result<Option<ResourceLocation>> {
        (**self).locate(path)
    }

    fn read(&self, location: &ResourceLocation) -> io::Result<Vec<u8>> {
        (**self).read(location)
    }
}

impl<L: ResourceLoader + ?Sized> ResourceLoader for &L {
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>> {
        (**self).locate_all(path)
    }

    fn locate(&self, path: &str) -> io::Result<Option<ResourceLocation>> {
        (**self).locate(path)
    }

    fn read(&self, location: &ResourceLocation) -> io::Result<Vec<u8>> {
        (**self).read(location)
    }
}

/// Reject paths that could escape a root.
pub(crate) fn validate_resource_path(path: &str) -> io::Result<()> {
    let invalid = |reason: &str| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid resource path {:?}: {}", path, reason),
        )
    };

    if path.is_empty() {
        return Err(invalid("empty"));
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(invalid("absolute"));
    }
    for component in std::path::Path::new(path).components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err(invalid("parent directory reference")),
            Component::RootDir | Component::Prefix(_) => return Err(invalid("absolute")),
        }
    }
    Ok(())
}
