//! Shared resolver used by concurrent tasks of one context.

use std::sync::atomic::Ordering;

use scoped_resources::{PropertyResolver, Scope, SharedPropertyResolver};

use crate::common::{fixture_classpath, CountingLoader};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_lookups_load_once() {
    let (loader, reads) = CountingLoader::new(fixture_classpath());
    let shared = SharedPropertyResolver::new(PropertyResolver::new(loader));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let shared = shared.clone();
            tokio::spawn(async move {
                let scope = Scope::new("com.example.Settings");
                shared.get_int("port", &scope).await.unwrap()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), 5432);
    }
    assert_eq!(reads.load(Ordering::SeqCst), 1);
    assert_eq!(shared.cached_scopes().await, 1);
}

#[tokio::test]
async fn test_shared_defaults() {
    let shared: SharedPropertyResolver<_> = PropertyResolver::new(fixture_classpath()).into();
    let scope = Scope::new("com.example.Missing");

    assert_eq!(shared.get_string("host", &scope).await, None);
    assert_eq!(shared.get_string_or("host", &scope, "localhost").await, "localhost");
    assert_eq!(shared.get_int_or("port", &scope, 80).await.unwrap(), 80);
}
