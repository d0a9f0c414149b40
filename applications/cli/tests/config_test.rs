//! Configuration loading from files

use cadence_catalog::DEFAULT_API_URL;
use cadence_cli::config::CliConfig;
use std::io::Write;

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_sections_from_file() {
    let file = config_file(
        r#"
[catalog]
api_url = "http://localhost:9000/items/songs"
timeout_secs = 5

[playback]
volume = 0.5
cue_first_track = false
"#,
    );

    let config = CliConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.catalog.api_url, "http://localhost:9000/items/songs");
    assert_eq!(config.catalog.timeout_secs, 5);
    assert_eq!(config.playback.volume, 0.5);
    assert!(!config.playback.cue_first_track);
}

#[test]
fn missing_sections_use_defaults() {
    let file = config_file("[playback]\nvolume = 0.8\n");

    let config = CliConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.catalog.api_url, DEFAULT_API_URL);
    assert!(config.playback.cue_first_track);
}

#[test]
fn invalid_values_are_rejected() {
    let file = config_file("[playback]\nvolume = 3.0\n");
    assert!(CliConfig::load(Some(file.path())).is_err());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let result = CliConfig::load(Some(std::path::Path::new("/nonexistent/cadence.toml")));
    assert!(result.is_err());
}
