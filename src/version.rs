//! Build identification.

use std::fmt;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build number baked in at compile time through `SCOPED_RESOURCES_BUILD`.
pub const BUILD: &str = match option_env!("SCOPED_RESOURCES_BUILD") {
    Some(build) => build,
    None => "0",
};

/// Version and build number of this library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build: &'static str,
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.version, self.build)
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build: BUILD,
    }
}
