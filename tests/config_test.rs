//! Configuration loading and offset-table defaults

use memsonar::{ConfigError, SonarConfig};
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        process_name = "game.exe"
        window_title = "Game Window"
        engine_module = "core.dll"

        [offsets]
        entity_list = 0x1000
        max_entities = 16
        "#
    )
    .unwrap();

    let config = SonarConfig::load(file.path()).unwrap();
    assert_eq!(config.process_name, "game.exe");
    assert_eq!(config.window_title.as_deref(), Some("Game Window"));
    assert_eq!(config.engine_module, "core.dll");
    assert_eq!(config.offsets.entity_list, 0x1000);
    assert_eq!(config.offsets.max_entities, 16);
    // Fields absent from the file keep the builtin values
    assert_eq!(config.offsets.entity_stride, 0x10);
    assert_eq!(config.client_module, "client_panorama.dll");
}

#[test]
fn missing_file_is_an_error() {
    let err = SonarConfig::load("no/such/config.toml").unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn load_or_default_falls_back() {
    let config = SonarConfig::load_or_default("no/such/config.toml");
    assert_eq!(config.process_name, "csgo.exe");
    assert_eq!(config.offsets.max_entities, 64);
}

#[test]
fn malformed_file_falls_back_in_load_or_default() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "process_name = [broken").unwrap();

    let strict = SonarConfig::load(file.path());
    assert!(matches!(strict, Err(ConfigError::TomlParse(_))));

    let lenient = SonarConfig::load_or_default(file.path());
    assert_eq!(lenient.process_name, "csgo.exe");
}
