//! Configuration system tests
//!
//! Tests for config paths and YAML config loading.

use recordpad::config_paths;
use recordpad::grid::DEFAULT_ROWS_PER_PAGE;
use recordpad::AppConfig;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.ends_with("recordpad"));
    }
}

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// App Config Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = AppConfig::default();
    assert_eq!(config.rows_per_page, DEFAULT_ROWS_PER_PAGE);
    assert_eq!(config.windowing.row_cap, 10_000);
}

#[test]
fn test_full_config_round_trips_through_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "rows_per_page: 20\n\
         windowing:\n\
         \x20 full_read_max_bytes: 1024\n\
         \x20 partial_read_max_bytes: 4096\n\
         \x20 row_cap: 100\n",
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();

    assert_eq!(config.rows_per_page, 20);
    assert_eq!(config.windowing.full_read_max_bytes, 1024);
    assert_eq!(config.windowing.partial_read_max_bytes, 4096);
    assert_eq!(config.windowing.row_cap, 100);

    let yaml = serde_yaml::to_string(&config).unwrap();
    let reparsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(reparsed, config);
}

#[test]
fn test_zero_rows_per_page_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "rows_per_page: 0\n").unwrap();

    assert_eq!(AppConfig::load_from(&path).unwrap().rows_per_page, 1);
    assert_eq!(
        AppConfig::default().with_rows_per_page(Some(0)).rows_per_page,
        1
    );
}

#[test]
fn test_cli_override_wins() {
    let config = AppConfig::default().with_rows_per_page(Some(7));
    assert_eq!(config.rows_per_page, 7);

    let config = AppConfig::default().with_rows_per_page(None);
    assert_eq!(config.rows_per_page, DEFAULT_ROWS_PER_PAGE);
}

#[test]
fn test_missing_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = AppConfig::load_from(&dir.path().join("nope.yaml"));
    assert!(result.is_err());
}
