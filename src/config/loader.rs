//! Configuration loading from the process environment.

use std::ffi::OsString;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Parse {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{name} is set but is not valid unicode")]
    NotUnicode { name: &'static str },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from the process environment.
pub fn load_from_env() -> Result<ProxyConfig, ConfigError> {
    load_with(|name| std::env::var_os(name))
}

/// Load and validate configuration using `lookup` to resolve variable names.
///
/// Unset variables keep their defaults. A variable that is set but cannot be
/// parsed, or is not unicode, is an error; `KEY` is taken verbatim,
/// including the empty string.
pub fn load_with<F>(lookup: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    let mut config = ProxyConfig::default();

    if let Some(port) = parse_var::<u16, _>(&lookup, "PORT")? {
        config.listener.bind_address = format!("0.0.0.0:{port}");
    }
    if let Some(secs) = parse_var(&lookup, "TIMEOUT")? {
        config.timeouts.request_secs = secs;
    }
    if let Some(secs) = parse_var(&lookup, "IDLE_TIMEOUT")? {
        config.timeouts.idle_secs = secs;
    }
    if let Some(retries) = parse_var(&lookup, "RETRIES")? {
        config.retries.max_retries = retries;
    }
    if let Some(enabled) = parse_var(&lookup, "CACHE_ENABLED")? {
        config.cache.enabled = enabled;
    }
    if let Some(secs) = parse_var(&lookup, "CACHE_TTL")? {
        config.cache.ttl_secs = secs;
    }
    if let Some(bytes) = parse_var(&lookup, "MAX_BODY_SIZE")? {
        config.security.max_body_size = bytes;
    }
    config.security.access_key = read_var(&lookup, "KEY")?;
    if let Some(level) = read_var(&lookup, "LOG_LEVEL")? {
        config.observability.log_level = level;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn read_var<F>(lookup: &F, name: &'static str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(name)
        .map(|raw| raw.into_string().map_err(|_| ConfigError::NotUnicode { name }))
        .transpose()
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<OsString>,
{
    let Some(raw) = read_var(lookup, name)? else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Parse {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        })
}
