// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Covers constraints serde attributes cannot express: a bindable host, a usable
//! upload limit, a known log level and distinct specialist identifiers.

use std::collections::HashMap;

use crate::diagnostic::ConfigError;
use crate::model::InterceptorConfig;

/// Log levels accepted by `server.log_level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure rather than stopping at the first one.
pub fn validate_config(config: &InterceptorConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.max_upload_mb == 0 {
        errors.push(ConfigError::Validation {
            message: "server.max_upload_mb must be at least 1".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level `{}` is not one of {}",
                config.server.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    // Identifiers double as set members in routing decisions, so two specialists
    // sharing a name would collapse into one.
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for (key, name) in config.routing.identifiers() {
        if name.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("routing.{key} must not be empty"),
            });
            continue;
        }
        if let Some(previous) = seen.insert(name, key) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "routing.{key} reuses identifier `{name}` already assigned to routing.{previous}"
                ),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
