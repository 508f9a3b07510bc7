//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use maskwise::config::{load_config, load_config_or_default};
use maskwise::domain::MaskwiseError;
use maskwise::overlay::{MatchStrategy, OverlayEngine, RenderTarget};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "MASKWISE_APPLICATION_LOG_LEVEL",
        "MASKWISE_RENDER_TARGET",
        "MASKWISE_RENDER_STRATEGY",
        "MASKWISE_FALLBACK_CONFIDENCE_THRESHOLD",
        "MASKWISE_FALLBACK_EXTENDED",
        "MASKWISE_FALLBACK_PATTERN_LIBRARY",
        "MASKWISE_PROTECT_ALTERNATIVES",
        "MASKWISE_PROTECT_SEED",
        "MASKWISE_LOGGING_LOCAL_ENABLED",
        "MASKWISE_LOGGING_LOCAL_PATH",
        "MASKWISE_LOGGING_LOCAL_ROTATION",
        "TEST_MASKWISE_LOG_DIR",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file
        .write_all(content.as_bytes())
        .expect("Failed to write config");
    temp_file.flush().expect("Failed to flush config");
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[render]
target = "text"
strategy = "offsets"

[fallback]
confidence_threshold = 0.85
extended = true

[protect]
alternatives = 5
seed = 1234

[logging]
local_enabled = true
local_path = "/tmp/maskwise"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.render.target, RenderTarget::Text);
    assert_eq!(config.render.strategy, MatchStrategy::Offsets);
    assert_eq!(config.fallback.confidence_threshold, 0.85);
    assert!(config.fallback.extended);
    assert_eq!(config.protect.alternatives, 5);
    assert_eq!(config.protect.seed, Some(1234));
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let engine = OverlayEngine::new(config.overlay_config()).expect("Failed to build engine");
    assert_eq!(engine.config().render.strategy, MatchStrategy::Offsets);
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[application]\nlog_level = \"warn\"\n");
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.render.target, RenderTarget::Html);
    assert_eq!(config.render.strategy, MatchStrategy::Literal);
    assert_eq!(config.fallback.confidence_threshold, 0.7);
    assert!(!config.fallback.extended);
    assert!(config.fallback.pattern_library.is_none());
    assert_eq!(config.protect.alternatives, 3);
    assert!(config.protect.seed.is_none());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_missing_file_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    assert!(load_config("definitely-missing-maskwise.toml").is_err());

    let config =
        load_config_or_default("definitely-missing-maskwise.toml").expect("Defaults should load");
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.render.target, RenderTarget::Html);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("TEST_MASKWISE_LOG_DIR", "/var/tmp/maskwise-logs");

    let temp_file = write_config(
        r#"
# local_path = "${UNSET_IN_A_COMMENT}"
[logging]
local_path = "${TEST_MASKWISE_LOG_DIR}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.logging.local_path, "/var/tmp/maskwise-logs");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[logging]\nlocal_path = \"${TEST_MASKWISE_LOG_DIR}\"\n");
    let result = load_config(temp_file.path());

    match result {
        Err(MaskwiseError::Configuration(message)) => {
            assert!(message.contains("TEST_MASKWISE_LOG_DIR"))
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("MASKWISE_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("MASKWISE_RENDER_TARGET", "plain");
    std::env::set_var("MASKWISE_RENDER_STRATEGY", "offsets");
    std::env::set_var("MASKWISE_FALLBACK_CONFIDENCE_THRESHOLD", "0.5");
    std::env::set_var("MASKWISE_FALLBACK_EXTENDED", "true");
    std::env::set_var("MASKWISE_PROTECT_ALTERNATIVES", "7");
    std::env::set_var("MASKWISE_PROTECT_SEED", "99");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[render]
target = "html"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.render.target, RenderTarget::Text);
    assert_eq!(config.render.strategy, MatchStrategy::Offsets);
    assert_eq!(config.fallback.confidence_threshold, 0.5);
    assert!(config.fallback.extended);
    assert_eq!(config.protect.alternatives, 7);
    assert_eq!(config.protect.seed, Some(99));

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_override_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    std::env::set_var("MASKWISE_PROTECT_ALTERNATIVES", "many");
    let result = load_config_or_default("definitely-missing-maskwise.toml");
    assert!(matches!(result, Err(MaskwiseError::Configuration(_))));

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        "[application]\nlog_level = \"verbose\"\n",
        "[fallback]\nconfidence_threshold = 1.5\n",
        "[protect]\nalternatives = 50\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[fallback]\npattern_library = \"/nonexistent/patterns.toml\"\n",
        "[render]\ntarget = \"pdf\"\n",
    ];

    for content in cases {
        let temp_file = write_config(content);
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected rejection of:\n{content}"
        );
    }
}
