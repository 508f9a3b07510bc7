//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MaskwiseConfig;
use crate::domain::errors::MaskwiseError;
use crate::domain::result::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MaskwiseConfig
/// 4. Applies environment variable overrides (MASKWISE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use maskwise::config::loader::load_config;
///
/// let config = load_config("maskwise.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MaskwiseConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MaskwiseError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MaskwiseError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: MaskwiseConfig = toml::from_str(&contents)
        .map_err(|e| MaskwiseError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// Environment overrides and validation still apply to the defaults. A file
/// that exists but is invalid is still an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<MaskwiseConfig> {
    let path = path.as_ref();

    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = MaskwiseConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut MaskwiseConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        MaskwiseError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| {
        MaskwiseError::Configuration(format!("Invalid substitution pattern: {e}"))
    })?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MaskwiseError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Parse an override value, naming the variable on failure
fn parse_env<T>(name: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| MaskwiseError::Configuration(format!("Invalid {name} value '{value}': {e}")))
}

/// Applies environment variable overrides using MASKWISE_* prefix
///
/// Environment variables follow the pattern: MASKWISE_<SECTION>_<KEY>
/// For example: MASKWISE_RENDER_TARGET, MASKWISE_FALLBACK_EXTENDED
fn apply_env_overrides(config: &mut MaskwiseConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("MASKWISE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Render overrides
    if let Some(val) = var("MASKWISE_RENDER_TARGET") {
        config.render.target = parse_env("MASKWISE_RENDER_TARGET", &val)?;
    }
    if let Some(val) = var("MASKWISE_RENDER_STRATEGY") {
        config.render.strategy = parse_env("MASKWISE_RENDER_STRATEGY", &val)?;
    }

    // Fallback overrides
    if let Some(val) = var("MASKWISE_FALLBACK_CONFIDENCE_THRESHOLD") {
        config.fallback.confidence_threshold =
            parse_env("MASKWISE_FALLBACK_CONFIDENCE_THRESHOLD", &val)?;
    }
    if let Some(val) = var("MASKWISE_FALLBACK_EXTENDED") {
        config.fallback.extended = parse_env("MASKWISE_FALLBACK_EXTENDED", &val)?;
    }
    if let Some(val) = var("MASKWISE_FALLBACK_PATTERN_LIBRARY") {
        config.fallback.pattern_library = Some(PathBuf::from(val));
    }

    // Protect overrides
    if let Some(val) = var("MASKWISE_PROTECT_ALTERNATIVES") {
        config.protect.alternatives = parse_env("MASKWISE_PROTECT_ALTERNATIVES", &val)?;
    }
    if let Some(val) = var("MASKWISE_PROTECT_SEED") {
        config.protect.seed = Some(parse_env("MASKWISE_PROTECT_SEED", &val)?);
    }

    // Logging overrides
    if let Some(val) = var("MASKWISE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_env("MASKWISE_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("MASKWISE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("MASKWISE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
