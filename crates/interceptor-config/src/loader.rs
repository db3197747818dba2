// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./interceptor.toml` > `~/.config/interceptor/interceptor.toml`
//! > `/etc/interceptor/interceptor.toml`, with environment variable overrides via the
//! `INTERCEPTOR_` prefix and the conventional bare `PORT` variable.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    Provider,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::InterceptorConfig;

/// System-wide config file location.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/interceptor/interceptor.toml";

/// Local config file name, resolved against the working directory.
pub const LOCAL_CONFIG_FILE: &str = "interceptor.toml";

/// Config sections that `INTERCEPTOR_<SECTION>_<KEY>` variables may target.
const ENV_SECTIONS: &[&str] = &["server", "routing", "metrics"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/interceptor/interceptor.toml` (system-wide)
/// 3. `~/.config/interceptor/interceptor.toml` (user XDG config)
/// 4. `./interceptor.toml` (local directory)
/// 5. `INTERCEPTOR_*` environment variables
/// 6. `PORT` environment variable
pub fn load_config() -> Result<InterceptorConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<InterceptorConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(InterceptorConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<InterceptorConfig, figment::Error> {
    let figment = Figment::new()
        .merge(Serialized::defaults(InterceptorConfig::default()))
        .merge(Toml::file(path));
    with_env_overrides(figment, env_provider(), port_provider()).extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(InterceptorConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));

    if let Some(user_path) = user_config_path() {
        tracing::debug!(path = %user_path.display(), "user config location");
        figment = figment.merge(Toml::file(user_path));
    }

    with_env_overrides(
        figment.merge(Toml::file(LOCAL_CONFIG_FILE)),
        env_provider(),
        port_provider(),
    )
}

/// Merge the environment layers on top of `figment`.
///
/// `prefixed` carries the `INTERCEPTOR_*` overrides and `port` the bare `PORT`
/// variable; `PORT` is merged last and wins for `server.port`.
pub fn with_env_overrides(
    figment: Figment,
    prefixed: impl Provider,
    port: impl Provider,
) -> Figment {
    figment.merge(prefixed).merge(port)
}

/// Path of the per-user config file, when the platform has a config dir.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("interceptor").join(LOCAL_CONFIG_FILE))
}

/// Map a lowercased, prefix-stripped env key to a dotted config path.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `server_max_upload_mb` maps to `server.max_upload_mb`, not
/// `server.max.upload.mb`. Keys outside a known section pass through unchanged
/// and are then rejected by `deny_unknown_fields`.
pub fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

/// Environment provider for `INTERCEPTOR_*` variables.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain underscores.
fn env_provider() -> Env {
    Env::prefixed("INTERCEPTOR_").map(|key| map_env_key(key.as_str()).into())
}

/// The bare `PORT` variable most container platforms inject.
fn port_provider() -> Env {
    Env::raw()
        .only(&["PORT"])
        .map(|_| "server.port".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_section_prefix_to_dot() {
        assert_eq!(map_env_key("server_port"), "server.port");
        assert_eq!(map_env_key("server_max_upload_mb"), "server.max_upload_mb");
        assert_eq!(map_env_key("routing_temporal_model"), "routing.temporal_model");
        assert_eq!(map_env_key("metrics_enabled"), "metrics.enabled");
    }

    #[test]
    fn unknown_section_passes_through() {
        assert_eq!(map_env_key("bogus_key"), "bogus_key");
        assert_eq!(map_env_key("serverport"), "serverport");
    }

    #[test]
    fn user_config_path_ends_with_file_name() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("interceptor/interceptor.toml"));
        }
    }
}
