use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use scoped_resources::{ClassPath, ResourceLoader, ResourceLocation};

/// Root of an on-disk fixture library under `tests/resources`.
pub(crate) fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join(name)
}

/// Search path over both fixture libraries, `lib-a` first.
pub(crate) fn fixture_classpath() -> ClassPath {
    ClassPath::new([fixture_root("lib-a"), fixture_root("lib-b")])
}

/// Loader wrapper counting how often resources are read.
pub(crate) struct CountingLoader<L> {
    inner: L,
    reads: Arc<AtomicUsize>,
}

impl<L> CountingLoader<L> {
    pub(crate) fn new(inner: L) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                inner,
                reads: Arc::clone(&reads),
            },
            reads,
        )
    }
}

impl<L: ResourceLoader> ResourceLoader for CountingLoader<L> {
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>> {
        self.inner.locate_all(path)
    }

    fn read(&self, location: &ResourceLocation) -> io::Result<Vec<u8>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.read(location)
    }
}

/// Loader whose resources exist but cannot be read.
pub(crate) struct UnreadableLoader;

impl ResourceLoader for UnreadableLoader {
    fn locate_all(&self, path: &str) -> io::Result<Vec<ResourceLocation>> {
        Ok(vec![
            ResourceLocation::new("broken-a", path),
            ResourceLocation::new("broken-b", path),
        ])
    }

    fn read(&self, _location: &ResourceLocation) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"))
    }
}

/// Loader whose search path cannot be enumerated.
pub(crate) struct FailingLoader;

impl ResourceLoader for FailingLoader {
    fn locate_all(&self, _path: &str) -> io::Result<Vec<ResourceLocation>> {
        Err(io::Error::new(io::ErrorKind::Other, "search path offline"))
    }

    fn read(&self, _location: &ResourceLocation) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::Other, "search path offline"))
    }
}

/// Search path that starts with a plain file, then the fixture libraries.
pub(crate) fn classpath_behind_file_root(dir: &std::path::Path) -> ClassPath {
    let jar = dir.join("legacy.jar");
    std::fs::write(&jar, b"PK\x03\x04").unwrap();
    ClassPath::new([jar, fixture_root("lib-a"), fixture_root("lib-b")])
}
