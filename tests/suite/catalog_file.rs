use std::fs;

use modguide_engine::{
    App, BucketId, CatalogSource, ExpansionKey, LoadError, UiOptions, load_catalog,
};
use modguide_tui::print_view;

const CUSTOM: &str = r#"
[guide]
title = "Tenant Toolkit"

[guide.registered]
title = "Needs an app"
prerequisites = ["Client secret"]

[[module]]
name = "Contoso.Sites"
support = { legacy = true }
score = 6
capabilities = ["Site Collections"]
install = "Install-Module Contoso.Sites"
auth = "Connect-ContosoSites"

[[module]]
name = "Contoso.Graph"
requires_registration = true
support = { modern = true }
score = 3
docs = [
    { label = "Users", url = "https://docs.contoso.test/users" },
]
install = "Install-Module Contoso.Graph"
auth = "Connect-ContosoGraph -ClientId $id"
"#;

fn ascii() -> UiOptions {
    UiOptions {
        ascii_only: true,
        high_contrast: false,
    }
}

fn custom_app() -> (tempfile::TempDir, App) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CUSTOM).unwrap();
    let document = load_catalog(&CatalogSource::File(path)).unwrap();
    (dir, App::new(document, ascii()))
}

#[test]
fn custom_catalog_file_drives_every_section() {
    let (_dir, mut app) = custom_app();
    let text = print_view(&mut app, 80);

    assert!(text.starts_with("Tenant Toolkit\n"));
    assert!(text.contains("Needs an app"));
    assert!(text.contains("Contoso.Sites  PS5 y  PS7 n  [+]"));
    assert!(text.contains("Contoso.Graph  Registration required  PS5 n  PS7 y  [+]"));
    assert!(text.contains("Capability score  6/8"));
    assert!(text.contains("Capability score  3/8"));
    assert!(!text.contains("Install-Module"));
    // Guide copy missing from the file falls back to defaults.
    assert!(text.contains("No Registration Required"));
    assert!(text.contains("Key Takeaways"));
}

#[test]
fn expanding_a_summary_entry_adds_shared_prerequisites() {
    let (_dir, mut app) = custom_app();
    assert!(app.expand(&ExpansionKey::summary(
        BucketId::Registered,
        "Contoso.Graph"
    )));
    let text = print_view(&mut app, 80);

    assert!(text.contains("Client secret"));
    assert!(text.contains("Connect-ContosoGraph -ClientId $id"));
    assert!(text.contains("Users -> https://docs.contoso.test/users"));
    // The grid card of the same module stays collapsed.
    assert_eq!(text.matches("Connect-ContosoGraph").count(), 1);
}

#[test]
fn grid_detail_without_docs_shows_placeholder() {
    let (_dir, mut app) = custom_app();
    assert!(app.expand(&ExpansionKey::grid("Contoso.Sites")));
    let text = print_view(&mut app, 80);

    assert!(text.contains("[-] Installation & Authentication"));
    assert!(text.contains("Install-Module Contoso.Sites"));
    assert!(text.contains("No documentation available"));
}

#[test]
fn duplicate_names_are_rejected_with_origin() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dupes.toml");
    fs::write(
        &path,
        "[[module]]\nname = \"Same\"\n\n[[module]]\nname = \"Same\"\n",
    )
    .unwrap();

    let err = load_catalog(&CatalogSource::File(path.clone())).unwrap_err();
    assert!(matches!(err, LoadError::Invalid { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn unknown_expand_key_changes_nothing() {
    let mut app = App::new(load_catalog(&CatalogSource::Builtin).unwrap(), ascii());
    let before = print_view(&mut app, 100);
    assert!(!app.expand(&ExpansionKey::grid("NoSuchModule")));
    assert_eq!(print_view(&mut app, 100), before);
}
