//! Directory-backed resource search path.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::resource::config::ResourceConfig;
use crate::resource::{validate_resource_path, ResourceLoader, ResourceLocation};

/// Ordered list of root directories searched for resources.
#[derive(Debug, Clone, Default)]
pub struct ClassPath {
    roots: Vec<PathBuf>,
}

impl ClassPath {
    /// Create a search path from roots, searched in the given order.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a search path from configured roots.
    pub fn from_config(config: &ResourceConfig) -> Self {
        Self::new(config.roots.iter().cloned())
    }

    /// Append a root searched after the existing ones.
    pub fn push_root(&mut self, root: impl Into<PathBuf>) {
        self.roots.push(root.into());
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn candidate(root: &Path, path: &str) -> PathBuf {
        path.split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .fold(root.to_path_buf(), |acc, segment| acc.join(segment))
    }

    /// Whether a file sits where a directory of `candidate` should be.
    fn blocked_by_file(root: &Path, candidate: &Path) -> bool {
        candidate
            .ancestors()
            .skip(1)
            .take_while(|ancestor| *ancestor != root)
            .any(Path::is_file)
    }

    fn probe(root: &Path, path: &str) -> io::Result<Option<ResourceLocation>> {
        if !root.is_dir() {
            if root.exists() {
                log::debug!("Skipping resource root {:?}: not a directory", root);
            } else {
                log::debug!("Skipping missing resource root {:?}", root);
            }
            return Ok(None);
        }

        let candidate = Self::candidate(root, path);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() => Ok(Some(ResourceLocation::new(
                root.to_string_lossy(),
                path,
            ))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(_) if Self::blocked_by_file(root, &candidate) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl ResourceLoader for ClassPath {
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>> {
        validate_resource_path(path)?;
        let mut found = Vec::new();
        for root in &self.roots {
            if let Some(location) = Self::probe(root, path)? {
                found.push(location);
            }
        }
        Ok(found)
    }

    fn locate(&self, path: &str) -> io::Result<Option<ResourceLocation>> {
        validate_resource_path(path)?;
        for root in &self.roots {
            if let Some(location) = Self::probe(root, path)? {
                return Ok(Some(location));
            }
        }
        Ok(None)
    }

    fn read(&self, location: &ResourceLocation) -> io::Result<Vec<u8>> {
        validate_resource_path(&location.path)?;
        fs::read(Self::candidate(Path::new(&location.origin), &location.path))
    }
}
