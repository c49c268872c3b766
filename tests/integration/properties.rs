//! Property resolution against on-disk fixture libraries.

use std::sync::atomic::Ordering;

use scoped_resources::{Error, MemoryResources, PropertyResolver, Scope};

use crate::common::{
    classpath_behind_file_root, fixture_classpath, CountingLoader, UnreadableLoader,
};

/// Scope whose table lives at `integration/properties/Sample.properties`.
struct Sample;

impl Sample {
    fn scope(&self) -> Scope {
        Scope::of_val(self)
    }
}

struct NoResource;

#[test]
fn test_get_string_for_type_scope() {
    let mut resolver = PropertyResolver::new(fixture_classpath());
    let sample = Sample;

    assert_eq!(resolver.get_string("value1", &sample.scope()), Some("1".to_string()));
    assert_eq!(resolver.get_string("value1", &Scope::of::<Sample>()), Some("1".to_string()));
    assert_eq!(resolver.get_string("value2", &sample.scope()), Some("2".to_string()));
    assert_eq!(resolver.get_string("value3", &sample.scope()), Some("greg".to_string()));
    assert_eq!(resolver.get_string("unknown", &sample.scope()), None);
}

#[test]
fn test_get_int_for_type_scope() {
    let mut resolver = PropertyResolver::new(fixture_classpath());
    let scope = Scope::of::<Sample>();

    assert_eq!(resolver.get_int("value1", &scope).unwrap(), 1);
    assert_eq!(resolver.get_int("value2", &scope).unwrap(), 2);
    assert_eq!(resolver.get_int("unknown", &scope).unwrap(), 0);
    assert_eq!(resolver.get_int_or("unknown", &scope, -1).unwrap(), -1);

    for _ in 0..3 {
        assert!(matches!(
            resolver.get_int("value3", &scope),
            Err(Error::NotAnInteger { .. })
        ));
    }
}

#[test]
fn test_scope_without_resource_is_empty() {
    let mut resolver = PropertyResolver::new(fixture_classpath());
    let scope = Scope::of::<NoResource>();

    for name in ["value1", "host", ""] {
        assert_eq!(resolver.get_string(name, &scope), None);
    }
    assert_eq!(resolver.get_string_or("host", &scope, "localhost"), "localhost");
    assert_eq!(resolver.get_int("port", &scope).unwrap(), 0);
    assert!(resolver.table(&scope).is_empty());
}

#[test]
fn test_first_root_shadows_later_roots() {
    let mut resolver = PropertyResolver::new(fixture_classpath());
    let scope = Scope::new("com.example.Settings");

    assert_eq!(resolver.get_string("host", &scope), Some("db.internal".to_string()));
    assert_eq!(resolver.get_int("port", &scope).unwrap(), 5432);
    assert_eq!(resolver.get_string("timeout", &scope), Some("30s".to_string()));
    assert_eq!(
        resolver.get_string("greeting", &scope),
        Some("Hello, world".to_string())
    );
}

#[test]
fn test_corrupt_resource_degrades_to_empty_table() {
    let mut resolver = PropertyResolver::new(fixture_classpath());
    let scope = Scope::new("com.example.Broken");

    assert_eq!(resolver.get_string("good", &scope), None);
    assert_eq!(resolver.get_int("good", &scope).unwrap(), 0);
    assert!(resolver.cache().contains(&scope));
}

#[test]
fn test_unreadable_resource_degrades_to_empty_table() {
    let mut resolver = PropertyResolver::new(UnreadableLoader);
    let scope = Scope::new("com.example.Settings");

    assert_eq!(resolver.get_string("host", &scope), None);
    assert_eq!(resolver.get_string_or("host", &scope, "fallback"), "fallback");
}

#[test]
fn test_resource_is_read_once_per_resolver() {
    let (loader, reads) = CountingLoader::new(fixture_classpath());
    let mut resolver = PropertyResolver::new(loader);
    let scope = Scope::new("com.example.Settings");

    for _ in 0..5 {
        assert_eq!(resolver.get_string("host", &scope), Some("db.internal".to_string()));
        let _ = resolver.get_int("port", &scope);
    }
    assert_eq!(reads.load(Ordering::SeqCst), 1);

    resolver.table(&Scope::of::<Sample>());
    assert_eq!(reads.load(Ordering::SeqCst), 2);
    assert_eq!(resolver.cache().len(), 2);
}

#[test]
fn test_resolvers_do_not_share_caches() {
    let (loader, reads) = CountingLoader::new(fixture_classpath());
    let loader = std::sync::Arc::new(loader);
    let scope = Scope::new("com.example.Settings");

    let mut first = PropertyResolver::new(std::sync::Arc::clone(&loader));
    let mut second = PropertyResolver::new(std::sync::Arc::clone(&loader));
    first.get_string("host", &scope);
    second.get_string("host", &scope);

    assert_eq!(reads.load(Ordering::SeqCst), 2);
}

#[test]
fn test_per_thread_resolvers() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let mut resolver = PropertyResolver::new(fixture_classpath());
                resolver.get_int("value2", &Scope::of::<Sample>()).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}

#[test]
fn test_embedded_resources() {
    let resources = MemoryResources::new().with(
        "embedded",
        "integration/properties/Sample.properties",
        include_str!("../resources/lib-a/integration/properties/Sample.properties"),
    );
    let mut resolver = PropertyResolver::new(resources);
    assert_eq!(
        resolver.get_string_or("value3", &Scope::of::<Sample>(), "none"),
        "greg"
    );
}

#[test]
fn test_file_on_search_path_does_not_hide_later_roots() {
    let dir = tempfile::tempdir().unwrap();
    let mut resolver = PropertyResolver::new(classpath_behind_file_root(dir.path()));
    let scope = Scope::new("com.example.Settings");

    assert_eq!(resolver.get_string("host", &scope), Some("db.internal".to_string()));
    assert_eq!(resolver.get_int("value1", &Scope::of::<Sample>()).unwrap(), 1);
}
