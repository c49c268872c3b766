//! Property resolver shared by the tasks of one logical context.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::Result;
use crate::properties::resolver::{parse_int, PropertyCache, PropertyResolver};
use crate::properties::scope::Scope;
use crate::properties::table::PropertyTable;
use crate::resource::ResourceLoader;

/// Cloneable handle to a [`PropertyResolver`] used from several async tasks.
///
/// The lookup-then-load step runs under a single lock, so concurrent first
/// lookups of a scope read its resource exactly once. Resource reads are
/// blocking and run on tokio's blocking pool, not on a runtime worker.
pub struct SharedPropertyResolver<L> {
    inner: Arc<Mutex<PropertyResolver<L>>>,
}

impl<L> fmt::Debug for SharedPropertyResolver<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPropertyResolver")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

impl<L> Clone for SharedPropertyResolver<L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<L: ResourceLoader + 'static> SharedPropertyResolver<L> {
    pub fn new(resolver: PropertyResolver<L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(resolver)),
        }
    }

    pub async fn table(&self, scope: &Scope) -> Arc<PropertyTable> {
        let mut resolver = Arc::clone(&self.inner).lock_owned().await;
        if let Some(table) = resolver.cache().get(scope) {
            return table;
        }

        let scope = scope.clone();
        let loading = scope.clone();
        match tokio::task::spawn_blocking(move || resolver.table(&loading)).await {
            Ok(table) => table,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                log::warn!("Properties load for {} was cancelled: {}", scope, e);
                Arc::new(PropertyTable::empty())
            }
        }
    }

    pub async fn get_string(&self, name: &str, scope: &Scope) -> Option<String> {
        self.table(scope).await.get(name).map(String::from)
    }

    pub async fn get_string_or(&self, name: &str, scope: &Scope, default: &str) -> String {
        self.get_string(name, scope)
            .await
            .unwrap_or_else(|| default.to_string())
    }

    pub async fn get_int(&self, name: &str, scope: &Scope) -> Result<i32> {
        self.get_int_or(name, scope, 0).await
    }

    pub async fn get_int_or(&self, name: &str, scope: &Scope, default: i32) -> Result<i32> {
        match self.get_string(name, scope).await {
            Some(value) => parse_int(scope, name, value),
            None => Ok(default),
        }
    }

    /// Number of scopes loaded so far.
    pub async fn cached_scopes(&self) -> usize {
        self.inner.lock().await.cache().len()
    }

    /// Recover the resolver's cache once every other handle is dropped.
    pub fn try_into_cache(self) -> std::result::Result<PropertyCache, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().into_cache()),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<L: ResourceLoader + 'static> From<PropertyResolver<L>> for SharedPropertyResolver<L> {
    fn from(resolver: PropertyResolver<L>) -> Self {
        Self::new(resolver)
    }
}
