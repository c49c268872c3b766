//! Default values for resource naming conventions.

use std::path::PathBuf;

/// Suffix appended to a scope's simple name to form its properties resource.
pub const PROPERTIES_SUFFIX: &str = ".properties";
/// Namespace under which provider resources are looked up.
pub const SERVICES_PREFIX: &str = "META-INF/services/";
/// Environment variable holding the resource search path.
pub const SEARCH_PATH_ENV: &str = "SCOPED_RESOURCES_PATH";
/// Directory name used under the user config dir.
pub const USER_DIR_NAME: &str = "scoped-resources";

pub fn properties_suffix() -> String { PROPERTIES_SUFFIX.to_string() }
pub fn services_prefix() -> String { SERVICES_PREFIX.to_string() }

pub fn roots() -> Vec<PathBuf> {
    let mut roots = vec![PathBuf::from(".")];
    if let Some(config_dir) = dirs::config_dir() {
        roots.push(config_dir.join(USER_DIR_NAME));
    }
    roots
}
