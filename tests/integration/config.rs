//! Components built from a JSON configuration file.

use scoped_resources::{PropertyResolver, ProviderDiscovery, ResourceConfig, Scope};

use crate::common::fixture_root;

#[test]
fn test_components_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("resources.json");
    let config = serde_json::json!({
        "roots": [fixture_root("lib-b"), fixture_root("lib-a")],
    });
    std::fs::write(&file, config.to_string()).unwrap();

    let config = ResourceConfig::from_json_file(&file).unwrap();
    let mut resolver = PropertyResolver::from_config(&config);
    assert_eq!(
        resolver.get_string("host", &Scope::new("com.example.Settings")),
        Some("shadowed.example".to_string())
    );

    let report = ProviderDiscovery::from_config(&config).scan("com.example.Codec");
    assert_eq!(report.entries[0].name, "com.example.Zstd");
}

#[test]
fn test_custom_conventions_from_config() {
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("app").join("plugins")).unwrap();
    std::fs::write(root.path().join("app").join("Server.conf"), "port=8080\n").unwrap();
    std::fs::write(
        root.path().join("app").join("plugins").join("app.Handler"),
        "app.handlers::Static\n",
    )
    .unwrap();

    let config = ResourceConfig::from_json(
        &serde_json::json!({
            "roots": [root.path()],
            "properties_suffix": ".conf",
            "services_prefix": "app/plugins",
        })
        .to_string(),
    )
    .unwrap();

    let mut resolver = PropertyResolver::from_config(&config);
    assert_eq!(resolver.get_int("port", &Scope::new("app::Server")).unwrap(), 8080);

    let report = ProviderDiscovery::from_config(&config).scan("app.Handler");
    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.entries[0].name, "app.handlers::Static");
}
