//! In-memory resource bundles.

use std::collections::HashMap;
use std::io;

use crate::resource::{validate_resource_path, ResourceLoader, ResourceLocation};

#[derive(Debug, Clone, Default)]
struct Bundle {
    name: String,
    entries: HashMap<String, Vec<u8>>,
}

/// Ordered set of named in-memory bundles.
///
/// Each bundle plays the role of one root directory; useful for resources
/// compiled into the binary with `include_str!`/`include_bytes!`.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    bundles: Vec<Bundle>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource to the named bundle, creating the bundle at the end of
    /// the search order if needed.
    pub fn insert(
        &mut self,
        bundle: &str,
        path: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> &mut Self {
        let index = match self.bundles.iter().position(|b| b.name == bundle) {
            Some(index) => index,
            None => {
                self.bundles.push(Bundle {
                    name: bundle.to_string(),
                    entries: HashMap::new(),
                });
                self.bundles.len() - 1
            }
        };
        self.bundles[index]
            .entries
            .insert(path.into(), contents.into());
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(
        mut self,
        bundle: &str,
        path: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(bundle, path, contents);
        self
    }

    pub fn bundle_names(&self) -> impl Iterator<Item = &str> {
        self.bundles.iter().map(|b| b.name.as_str())
    }
}

impl ResourceLoader for MemoryResources {
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>> {
        validate_resource_path(path)?;
        Ok(self
            .bundles
            .iter()
            .filter(|b| b.entries.contains_key(path))
            .map(|b| ResourceLocation::new(b.name.clone(), path))
            .collect())
    }

    fn read(&self, location: &ResourceLocation) -> io::Result<Vec<u8>> {
        self.bundles
            .iter()
            .find(|b| b.name == location.origin)
            .and_then(|b| b.entries.get(&location.path))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("resource {} not found", location),
                )
            })
    }
}
