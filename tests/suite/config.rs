use std::fs;

use modguide_engine::{App, CatalogSource, ConfigError, GuideConfig, load_catalog};
use modguide_tui::print_view;

#[test]
fn config_selects_catalog_and_glyphs() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("mine.toml");
    fs::write(
        &catalog,
        "[guide]\ntitle = \"From Config\"\n\n[[module]]\nname = \"Only\"\nsupport = { legacy = true, modern = true }\n",
    )
    .unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[app]\ncatalog = {:?}\nascii_only = true\n",
            catalog.display().to_string()
        ),
    )
    .unwrap();

    let config = GuideConfig::load_from(&config_path).unwrap().unwrap();
    assert_eq!(config.catalog_path(), Some(catalog.clone()));
    let options = config.ui_options();
    assert!(options.ascii_only);
    assert!(!options.high_contrast);

    let document = load_catalog(&CatalogSource::File(catalog)).unwrap();
    let mut app = App::new(document, options);
    let text = print_view(&mut app, 60);
    assert!(text.starts_with("From Config\n"));
    assert!(text.contains("Only  PS5 y  PS7 y  [+]"));
}

#[test]
fn broken_config_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "[app\nascii_only = yes").unwrap();

    let err = GuideConfig::load_from(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), &config_path);
}

#[test]
fn missing_config_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = GuideConfig::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(loaded.is_none());
}
