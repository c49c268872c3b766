//! Resource search configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::Result;

/// Where resources are searched and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Root directories, searched in order
    #[serde(default = "defaults::roots")]
    pub roots: Vec<PathBuf>,
    /// Suffix of per-scope properties resources
    #[serde(default = "defaults::properties_suffix")]
    pub properties_suffix: String,
    /// Namespace of provider resources
    #[serde(default = "defaults::services_prefix")]
    pub services_prefix: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            roots: defaults::roots(),
            properties_suffix: defaults::properties_suffix(),
            services_prefix: defaults::services_prefix(),
        }
    }
}

impl ResourceConfig {
    /// Build a configuration from the process environment.
    ///
    /// `SCOPED_RESOURCES_PATH` replaces the default roots when set; it uses
    /// the platform's path-list syntax (`:` on Unix, `;` on Windows).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(search_path) = std::env::var_os(defaults::SEARCH_PATH_ENV) {
            let roots: Vec<PathBuf> = std::env::split_paths(&search_path)
                .filter(|p| !p.as_os_str().is_empty())
                .collect();
            log::debug!("Using resource search path from environment: {:?}", roots);
            config.roots = roots;
        }
        config
    }

    /// Parse a JSON configuration document.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a JSON configuration file.
    ///
    /// Relative roots are resolved against the file's directory.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_json(&content)?;
        if let Some(base) = path.parent() {
            for root in config.roots.iter_mut() {
                if root.is_relative() {
                    *root = base.join(&*root);
                }
            }
        }
        Ok(config)
    }
}
