//! The declared output values are fixed regardless of build mode.

use std::path::PathBuf;

use shutter_config::{BuildMode, OutputFormat, ShutterConfig};

#[test]
fn declared_output_values() {
    let config = ShutterConfig::default();

    assert_eq!(config.input, PathBuf::from("src/main.js"));
    assert_eq!(config.output.file, PathBuf::from("public/camera.js"));
    assert_eq!(config.output.css_file, PathBuf::from("public/camera.css"));
    assert_eq!(config.output.format, OutputFormat::Iife);
    assert_eq!(config.output.name, "app");
    assert!(config.output.sourcemap);
    assert!(config.watch.clear_screen);
}

#[test]
fn output_values_do_not_depend_on_mode() {
    // The mode gates which stages are assembled, never the output record.
    for _mode in [BuildMode::Development, BuildMode::Production] {
        let config = ShutterConfig::default();
        assert_eq!(config.output.format, OutputFormat::Iife);
        assert_eq!(config.output.name, "app");
        assert!(config.output.sourcemap);
    }
}

#[test]
fn partial_toml_keeps_remaining_defaults() {
    let config: ShutterConfig = toml::from_str(
        r#"
            input = "src/app.js"

            [watch]
            clear_screen = false
        "#,
    )
    .unwrap();

    assert_eq!(config.input, PathBuf::from("src/app.js"));
    assert!(!config.watch.clear_screen);
    assert_eq!(config.output.name, "app");
    assert_eq!(config.output.file, PathBuf::from("public/camera.js"));
}
