use std::fs;
use tempfile::TempDir;

#[test]
fn configuration_path_is_logged_once_logging_is_up() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("logs");
    let path = temp.path().join("server.toml");
    fs::write(
        &path,
        format!("[logging]\npath = {:?}\njson = true\n\n[server]\nport = 9100\n", logs),
    )
    .unwrap();

    let (cfg, logger) = spechub_server::bootstrap(&path).unwrap();
    assert_eq!(cfg.server.port, 9100);
    drop(logger);

    let contents: String = fs::read_dir(&logs)
        .unwrap()
        .flatten()
        .map(|entry| fs::read_to_string(entry.path()).unwrap())
        .collect();
    assert!(contents.contains("Configuration loaded"), "{contents}");
    assert!(contents.contains("server.toml"), "{contents}");
}
