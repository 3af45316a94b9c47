//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

fn validate_bucket_prefix(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Missing { field: field.into(), hint: format!("Set SWCACHE_{}", field.to_uppercase()) });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Invalid { field: field.into(), reason: "must not contain whitespace".into() });
    }
    Ok(())
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - a bucket prefix is empty, contains whitespace, or both prefixes are equal
    /// - `cache_version` is 0
    /// - `accelerated_hosts` is empty or contains a blank pattern
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_bucket_prefix("app_name", &self.app_name)?;
        validate_bucket_prefix("resource_name", &self.resource_name)?;
        if self.app_name == self.resource_name {
            return Err(ConfigError::Invalid {
                field: "resource_name".into(),
                reason: "must differ from app_name".into(),
            });
        }

        if self.cache_version == 0 {
            return Err(ConfigError::Invalid { field: "cache_version".into(), reason: "must be at least 1".into() });
        }

        if self.accelerated_hosts.is_empty() {
            return Err(ConfigError::Missing {
                field: "accelerated_hosts".into(),
                hint: "Set SWCACHE_ACCELERATED_HOSTS to a comma-separated host list".into(),
            });
        }
        if self.accelerated_hosts.iter().any(|h| h.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "accelerated_hosts".into(),
                reason: "must not contain empty patterns".into(),
            });
        }

        if self.max_bytes == 0 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must be greater than 0".into() });
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(ConfigError::Invalid { field: "max_bytes".into(), reason: "must not exceed 50MB".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.accelerated_hosts.iter().any(|h| !h.contains('.')) {
            tracing::warn!(
                hosts = ?self.accelerated_hosts,
                "accelerated_hosts contains a pattern without a dot; it may match unrelated hosts"
            );
        }

        Ok(())
    }
}
