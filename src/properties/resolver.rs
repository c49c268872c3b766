//! Scope-keyed property resolution with a load-once cache.

use std::collections::HashMap;
use std::sync::Arc;

use crate::defaults;
use crate::error::{Error, Result};
use crate::properties::scope::Scope;
use crate::properties::table::PropertyTable;
use crate::resource::{ClassPath, ResourceConfig, ResourceLoader};

/// Property tables loaded within one execution context.
///
/// Entries are added on first access and never evicted.
#[derive(Debug, Default)]
pub struct PropertyCache {
    tables: HashMap<Scope, Arc<PropertyTable>>,
}

impl PropertyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, scope: &Scope) -> Option<Arc<PropertyTable>> {
        self.tables.get(scope).cloned()
    }

    pub fn contains(&self, scope: &Scope) -> bool {
        self.tables.contains_key(scope)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.tables.keys()
    }

    /// Return the cached table for `scope`, running `load` only on a miss.
    pub fn get_or_load<F>(&mut self, scope: &Scope, load: F) -> Arc<PropertyTable>
    where
        F: FnOnce(&Scope) -> PropertyTable,
    {
        if let Some(table) = self.tables.get(scope) {
            return Arc::clone(table);
        }
        let table = Arc::new(load(scope));
        self.tables.insert(scope.clone(), Arc::clone(&table));
        table
    }
}

/// Resolves named values from per-scope properties resources.
///
/// Each resolver owns its cache, so one resolver corresponds to one execution
/// context. A scope's resource is read at most once per resolver.
pub struct PropertyResolver<L> {
    loader: L,
    suffix: String,
    cache: PropertyCache,
}

impl PropertyResolver<ClassPath> {
    /// Create a resolver over the configured search path.
    pub fn from_config(config: &ResourceConfig) -> Self {
        Self::new(ClassPath::from_config(config)).with_suffix(&config.properties_suffix)
    }
}

impl<L: ResourceLoader> PropertyResolver<L> {
    pub fn new(loader: L) -> Self {
        Self::with_cache(loader, PropertyCache::new())
    }

    /// Create a resolver that continues from an existing cache.
    pub fn with_cache(loader: L, cache: PropertyCache) -> Self {
        Self {
            loader,
            suffix: defaults::PROPERTIES_SUFFIX.to_string(),
            cache,
        }
    }

    /// Use a different resource suffix than `.properties`.
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn cache(&self) -> &PropertyCache {
        &self.cache
    }

    pub fn into_cache(self) -> PropertyCache {
        self.cache
    }

    /// Property table of `scope`, loading it on first access.
    pub fn table(&mut self, scope: &Scope) -> Arc<PropertyTable> {
        let loader = &self.loader;
        let suffix = &self.suffix;
        self.cache.get_or_load(scope, |scope| load_table(loader, scope, suffix))
    }

    /// Value of `name` in `scope`, if present.
    pub fn get_string(&mut self, name: &str, scope: &Scope) -> Option<String> {
        self.table(scope).get(name).map(String::from)
    }

    /// Value of `name` in `scope`, or `default` when absent.
    pub fn get_string_or(&mut self, name: &str, scope: &Scope, default: &str) -> String {
        self.get_string(name, scope).unwrap_or_else(|| default.to_string())
    }

    /// Integer value of `name` in `scope`; `0` when absent.
    ///
    /// Fails with [`Error::NotAnInteger`] when the value is present but not a
    /// base-10 `i32`.
    pub fn get_int(&mut self, name: &str, scope: &Scope) -> Result<i32> {
        self.get_int_or(name, scope, 0)
    }

    /// Integer value of `name` in `scope`, or `default` when absent.
    pub fn get_int_or(&mut self, name: &str, scope: &Scope, default: i32) -> Result<i32> {
        match self.get_string(name, scope) {
            Some(value) => parse_int(scope, name, value),
            None => Ok(default),
        }
    }
}

/// Read and parse the properties resource of `scope`.
///
/// Never fails: a missing resource gives an empty table, and an unreadable
/// or corrupt one is logged and also gives an empty table.
pub(crate) fn load_table<L: ResourceLoader + ?Sized>(
    loader: &L,
    scope: &Scope,
    suffix: &str,
) -> PropertyTable {
    let path = scope.resource_path(suffix);
    log::info!("Loading: {}", path);

    let location = match loader.locate(&path) {
        Ok(Some(location)) => location,
        Ok(None) => {
            log::debug!("No properties resource for {}", scope);
            return PropertyTable::empty();
        }
        Err(e) => {
            log::warn!("Failed to locate properties {}: {}", path, e);
            return PropertyTable::empty();
        }
    };

    let bytes = match loader.read(&location) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("Failed to read properties {}: {}", location, e);
            return PropertyTable::empty();
        }
    };

    match PropertyTable::parse(&bytes) {
        Ok(table) => table,
        Err(e) => {
            log::warn!("Discarding corrupt properties {}: {}", location, e);
            PropertyTable::empty()
        }
    }
}

pub(crate) fn parse_int(scope: &Scope, name: &str, value: String) -> Result<i32> {
    value.parse::<i32>().map_err(|source| Error::NotAnInteger {
        scope: scope.to_string(),
        name: name.to_string(),
        value,
        source,
    })
}
