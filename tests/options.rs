// tests/options.rs
//
// Tests for AppOptions layering and dataset path logic.
//
use std::fs;

use tempfile::TempDir;

use poke_scrape::config::options::{AppOptions, DatasetKind, ExportFormat, ExportOptions};
use poke_scrape::error::ConfigError;

#[test]
fn dataset_paths_follow_format() {
    let mut export = ExportOptions::default();
    assert!(export.dataset_path(DatasetKind::Pokemon).ends_with("out/pokemon.csv"));

    export.format = ExportFormat::Tsv;
    assert!(export.dataset_path(DatasetKind::Moves).ends_with("out/moves.tsv"));

    export.format = ExportFormat::Json;
    let manifest = export.manifest_path(DatasetKind::Types);
    assert!(manifest.to_string_lossy().ends_with("types.json.manifest.json"));
}

#[test]
fn config_file_overrides_only_what_it_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("poke_scrape.json");
    fs::write(
        &path,
        r#"{ "fetch": { "page_size": 25, "retry": { "max_attempts": 2 } },
             "export": { "format": "json" },
             "analysis": { "extra_legendaries": ["dragonite"] } }"#,
    )
    .unwrap();

    let opts = AppOptions::load(&path).unwrap();
    let defaults = AppOptions::default();
    assert_eq!(opts.fetch.page_size, 25);
    assert_eq!(opts.fetch.retry.max_attempts, 2);
    assert_eq!(opts.fetch.retry.base_delay_ms, defaults.fetch.retry.base_delay_ms);
    assert_eq!(opts.fetch.base_url, defaults.fetch.base_url);
    assert_eq!(opts.export.format, ExportFormat::Json);
    assert_eq!(opts.export.out_dir, defaults.export.out_dir);
    assert_eq!(opts.analysis.extra_legendaries, vec!["dragonite"]);
    assert_eq!(opts.analysis.top_n, defaults.analysis.top_n);
}

#[test]
fn bad_config_file_is_a_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(AppOptions::load(&path), Err(ConfigError::Parse { .. })));

    let missing = dir.path().join("nope.json");
    assert!(matches!(AppOptions::load_or_default(Some(&missing)), Err(ConfigError::Read { .. })));
}

#[test]
fn validation_rejects_unusable_settings() {
    let mut opts = AppOptions::default();
    assert!(opts.validate().is_ok());

    opts.fetch.retry.max_attempts = 0;
    assert!(matches!(opts.validate(), Err(ConfigError::ZeroAttempts)));

    opts.fetch.retry.max_attempts = 1;
    opts.fetch.base_url = "pokeapi.co/api/v2".to_string();
    assert!(matches!(opts.validate(), Err(ConfigError::BadBaseUrl(_))));
}
