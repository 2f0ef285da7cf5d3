//! Settings loading: compiled defaults overlaid by a TOML file.
//!
//! Environment overrides are not exercised here; the tests run in parallel
//! and would race on the process environment.

use std::fs;

use galaxyview::config::Settings;
use galaxyview::{InsertPolicy, Layering, ViewerError};

#[test]
fn test_defaults_match_the_viewer() {
    let settings = Settings::default();
    assert_eq!(settings.server.listen, "0.0.0.0:8081");
    assert_eq!(settings.source.base_url, "http://db.nbg1.emile.space");
    assert_eq!(settings.render.scale, 2000.0);
    assert_eq!(settings.render.svg_size, 15360);
    assert_eq!(settings.render.png_size, 16384);
    assert_eq!(settings.render.layering, Layering::BoxesOverStars);
    assert_eq!(settings.registry.policy, InsertPolicy::Append);
    assert!(settings.listen_addr().is_ok());
}

#[test]
fn test_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("galaxyview.toml");
    fs::write(
        &path,
        r#"
[render]
scale = 500.0
layering = "stars_over_boxes"

[registry]
policy = "indexed"
max_index = 42
"#,
    )
    .expect("write config");

    let settings = Settings::load(Some(&path)).expect("load settings");
    assert_eq!(settings.render.scale, 500.0);
    assert_eq!(settings.render.layering, Layering::StarsOverBoxes);
    assert_eq!(settings.render.svg_size, 15360, "Unset keys keep their defaults");
    assert_eq!(settings.registry.policy, InsertPolicy::Indexed);
    assert_eq!(settings.registry.max_index, 42);

    let renderer = settings.renderer();
    assert_eq!(renderer.scale, 500.0);
    assert_eq!(settings.registry().policy(), InsertPolicy::Indexed);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Settings::load(Some(&dir.path().join("absent.toml"))).expect_err("missing file");
    assert!(matches!(err, ViewerError::Config(_)));
}

#[test]
fn test_bad_listen_address() {
    let mut settings = Settings::default();
    settings.server.listen = "not an address".into();
    assert!(matches!(settings.listen_addr(), Err(ViewerError::Config(_))));
}
