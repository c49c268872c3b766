//! Explicit name-to-factory tables for provider resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Constructor for one provider of capability `T`.
pub type ProviderFactory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

/// Why an advertised provider name could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    /// Not a qualified identifier
    MalformedName,
    /// Well-formed but no factory registered under it
    Unregistered,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedName => write!(f, "malformed provider name"),
            Self::Unregistered => write!(f, "no provider registered under this name"),
        }
    }
}

fn qualified_name_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(?:(?:\.|::)[A-Za-z_$][A-Za-z0-9_$]*)*$")
            .expect("static provider name pattern is valid")
    })
}

/// Whether `name` is a `.` or `::` separated qualified identifier.
pub fn is_qualified_name(name: &str) -> bool {
    qualified_name_regex().is_match(name)
}

/// Providers known for one capability, keyed by the names that appear in
/// provider resources.
pub struct ProviderRegistry<T: ?Sized> {
    capability: String,
    factories: HashMap<String, ProviderFactory<T>>,
}

impl<T: ?Sized> ProviderRegistry<T> {
    /// Create an empty registry for `capability` (e.g. `com.example.Codec`).
    pub fn new(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            factories: HashMap::new(),
        }
    }

    pub fn capability(&self) -> &str {
        &self.capability
    }

    /// Register a provider constructor. Re-registering a name replaces it.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        if !is_qualified_name(name) {
            return Err(Error::InvalidProviderName(name.to_string()));
        }
        if self
            .factories
            .insert(name.to_string(), Arc::new(factory))
            .is_some()
        {
            log::debug!("Replaced provider '{}' for {}", name, self.capability);
        }
        Ok(())
    }

    /// Look up the factory for an advertised name.
    pub fn resolve(&self, name: &str) -> std::result::Result<ProviderFactory<T>, UnresolvedReason> {
        if !is_qualified_name(name) {
            return Err(UnresolvedReason::MalformedName);
        }
        self.factories
            .get(name)
            .cloned()
            .ok_or(UnresolvedReason::Unregistered)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl<T: ?Sized> fmt::Debug for ProviderRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ProviderRegistry")
            .field("capability", &self.capability)
            .field("providers", &names)
            .finish()
    }
}
