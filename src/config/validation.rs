//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (parsing handles syntax)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Validate the upstream host family forms usable URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("bind address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("upstream scheme {0:?} must be http or https")]
    UpstreamScheme(String),

    #[error("upstream domain must not be empty")]
    UpstreamDomain,
}

pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("TIMEOUT"));
    }
    if config.timeouts.idle_secs == 0 {
        errors.push(ValidationError::Zero("IDLE_TIMEOUT"));
    }
    if config.cache.enabled && config.cache.ttl_secs == 0 {
        errors.push(ValidationError::Zero("CACHE_TTL"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("MAX_BODY_SIZE"));
    }
    if !matches!(config.upstream.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::UpstreamScheme(
            config.upstream.scheme.clone(),
        ));
    }
    if config.upstream.domain.is_empty() {
        errors.push(ValidationError::UpstreamDomain);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ProxyConfig::default();
        config.listener.bind_address = "nowhere".into();
        config.timeouts.request_secs = 0;
        config.upstream.scheme = "ftp".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::Zero("TIMEOUT")));
    }

    #[test]
    fn test_zero_ttl_allowed_when_cache_disabled() {
        let mut config = ProxyConfig::default();
        config.cache.enabled = false;
        config.cache.ttl_secs = 0;
        assert!(validate_config(&config).is_ok());
    }
}
