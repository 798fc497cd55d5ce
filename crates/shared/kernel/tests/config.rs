use spechub_kernel::config::{ConfigError, load_config};
use spechub_kernel::domain::config::ApiConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn loads_toml_file_with_defaults_for_missing_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("server.toml");
    fs::write(
        &path,
        r#"
[server]
port = 9100

[store]
root = "/srv/configurations"
create = false
"#,
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(&path)).expect("config should load");
    assert_eq!(cfg.server.port, 9100);
    assert_eq!(cfg.store.root, std::path::PathBuf::from("/srv/configurations"));
    assert!(!cfg.store.create);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn extension_may_be_omitted() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("server.toml"), "[logging]\nlevel = \"debug\"\n").unwrap();

    let cfg: ApiConfig = load_config(Some(temp.path().join("server"))).expect("config should load");
    assert_eq!(cfg.logging.level, "debug");
}

#[test]
fn missing_file_is_an_error_with_context() {
    let temp = TempDir::new().unwrap();
    let err = load_config::<ApiConfig>(Some(temp.path().join("absent"))).unwrap_err();

    let ConfigError::Config { context, .. } = &err;
    assert!(context.as_deref().is_some_and(|c| c.contains("absent")));
    assert!(err.to_string().starts_with("Config error (Failed to build config from"));
}
