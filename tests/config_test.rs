//! Integration tests for configuration loading and validation.

use std::io::Write;

use linkmeta::config::{
    load_config, load_config_or_default, validate_config, Config, DEFAULT_SUMMARY_ENDPOINT,
};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn loads_partial_file_over_defaults() {
    let file = write_config(
        r#"
[fetch]
timeout_secs = 5
retries = 4

[summary]
endpoint = "http://localhost:9000/summarize/"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.fetch.timeout_secs, 5);
    assert_eq!(config.fetch.retries, 4);
    assert_eq!(config.fetch.max_redirects, 5);
    assert_eq!(config.summary.endpoint, "http://localhost:9000/summarize/");
    assert_eq!(config.summary.max_chars, 500);
    assert_eq!(config.summary.min_chars, 50);
}

#[test]
fn empty_file_gives_defaults() {
    let file = write_config("");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.fetch.retries, 2);
    assert_eq!(config.fetch.timeout_secs, 15);
    assert_eq!(config.summary.endpoint, DEFAULT_SUMMARY_ENDPOINT);
}

#[test]
fn explicit_path_is_used() {
    let file = write_config("[fetch]\nretries = 0\n");
    let config = load_config_or_default(Some(file.path())).unwrap();
    assert_eq!(config.fetch.retries, 0);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn malformed_toml_is_an_error() {
    let file = write_config("[fetch\ntimeout_secs = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn wrong_field_type_is_an_error() {
    let file = write_config("[fetch]\nretries = \"many\"\n");
    assert!(load_config(file.path()).is_err());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn defaults_are_valid() {
    assert!(validate_config(&Config::default()).is_ok());
}

#[test]
fn zero_timeout_is_rejected() {
    let file = write_config("[fetch]\ntimeout_secs = 0\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn inverted_backoff_is_rejected() {
    let mut config = Config::default();
    config.fetch.backoff_min_ms = 5000;
    config.fetch.backoff_max_ms = 1000;
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("inverted"));
}

#[test]
fn blank_user_agent_is_rejected() {
    let mut config = Config::default();
    config.fetch.user_agent = "  ".to_string();
    assert!(validate_config(&config).is_err());
}

#[test]
fn summary_bounds_are_checked() {
    let mut config = Config::default();
    config.summary.min_chars = 500;
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.summary.paragraph_count = 0;
    assert!(validate_config(&config).is_err());

    let mut config = Config::default();
    config.summary.endpoint = String::new();
    assert!(validate_config(&config).is_err());
}

#[test]
fn disabled_redirects_only_warn() {
    let mut config = Config::default();
    config.fetch.max_redirects = 0;
    assert!(validate_config(&config).is_ok());
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

#[test]
fn fetch_request_carries_config() {
    let mut config = Config::default();
    config.fetch.retries = 3;
    config.fetch.timeout_secs = 7;

    let request = config.fetch.request("https://example.com/");
    assert_eq!(request.url, "https://example.com/");
    assert_eq!(request.retries, 3);
    assert_eq!(request.timeout.as_secs(), 7);
    assert_eq!(request.max_attempts(), 4);
}

#[test]
fn service_url_percent_encodes_target() {
    let config = Config::default();
    assert_eq!(
        config.summary.service_url("https://example.com/a?b=c"),
        "https://r.jina.ai/http://https%3A%2F%2Fexample.com%2Fa%3Fb%3Dc"
    );
}
