// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Interceptor service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Interceptor configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptorConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Specialist routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Prometheus metrics settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind. Also settable through the bare `PORT` environment variable.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted upload, in MiB.
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: usize,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_mb: default_max_upload_mb(),
            log_level: default_log_level(),
        }
    }
}

impl ServerConfig {
    /// Upload limit in bytes.
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_mb() -> usize {
    512
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Specialist routing configuration.
///
/// Only display identifiers are configurable. The rule table itself is fixed so
/// that a given file routes identically on every deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Identifier of the baseline specialist, selected for every file.
    #[serde(default = "default_baseline_model")]
    pub baseline_model: String,

    /// Identifier of the compression-artifact specialist.
    #[serde(default = "default_compression_model")]
    pub compression_model: String,

    /// Identifier of the low-light specialist.
    #[serde(default = "default_low_light_model")]
    pub low_light_model: String,

    /// Identifier of the resolution-consistency specialist.
    #[serde(default = "default_resolution_model")]
    pub resolution_model: String,

    /// Identifier of the audio-visual sync specialist.
    #[serde(default = "default_audio_visual_model")]
    pub audio_visual_model: String,

    /// Identifier of the temporal-consistency specialist.
    #[serde(default = "default_temporal_model")]
    pub temporal_model: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            baseline_model: default_baseline_model(),
            compression_model: default_compression_model(),
            low_light_model: default_low_light_model(),
            resolution_model: default_resolution_model(),
            audio_visual_model: default_audio_visual_model(),
            temporal_model: default_temporal_model(),
        }
    }
}

impl RoutingConfig {
    /// All configured identifiers with their config key, in table order.
    pub fn identifiers(&self) -> [(&'static str, &str); 6] {
        [
            ("baseline_model", self.baseline_model.as_str()),
            ("compression_model", self.compression_model.as_str()),
            ("low_light_model", self.low_light_model.as_str()),
            ("resolution_model", self.resolution_model.as_str()),
            ("audio_visual_model", self.audio_visual_model.as_str()),
            ("temporal_model", self.temporal_model.as_str()),
        ]
    }
}

fn default_baseline_model() -> String {
    "BG-Model N".to_string()
}

fn default_compression_model() -> String {
    "CM-Model N".to_string()
}

fn default_low_light_model() -> String {
    "LL-Model N".to_string()
}

fn default_resolution_model() -> String {
    "RR-Model N".to_string()
}

fn default_audio_visual_model() -> String {
    "AV-Model N".to_string()
}

fn default_temporal_model() -> String {
    "TM-Model".to_string()
}

/// Prometheus metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve `/metrics`.
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

fn default_metrics_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routing_identifiers() {
        let routing = RoutingConfig::default();
        assert_eq!(routing.baseline_model, "BG-Model N");
        assert_eq!(routing.temporal_model, "TM-Model");
        assert_eq!(routing.identifiers().len(), 6);
    }

    #[test]
    fn max_upload_bytes_scales_mib() {
        let server = ServerConfig {
            max_upload_mb: 2,
            ..ServerConfig::default()
        };
        assert_eq!(server.max_upload_bytes(), 2 * 1024 * 1024);
    }

    #[test]
    fn partial_routing_section_keeps_other_defaults() {
        let config: InterceptorConfig = toml::from_str(
            r#"
[routing]
temporal_model = "TM-Model v2"
"#,
        )
        .unwrap();
        assert_eq!(config.routing.temporal_model, "TM-Model v2");
        assert_eq!(config.routing.compression_model, "CM-Model N");
        assert_eq!(config.server.port, 8000);
    }
}
