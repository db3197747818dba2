// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prometheus metrics for the Interceptor service.
//!
//! Uses the metrics-rs facade with the Prometheus exporter. The gateway exposes
//! [`PrometheusAdapter::render`] at `/metrics`.

pub mod recording;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use interceptor_core::InterceptorError;

pub use recording::{record_prediction, record_prediction_latency, record_routing};

/// Installed Prometheus recorder plus the handle used to render it.
pub struct PrometheusAdapter {
    handle: PrometheusHandle,
}

impl PrometheusAdapter {
    /// Install the Prometheus recorder globally.
    ///
    /// Only one recorder can be installed per process; a second call fails.
    pub fn new() -> Result<Self, InterceptorError> {
        let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
            InterceptorError::Internal(format!("failed to install Prometheus recorder: {e}"))
        })?;

        recording::register_metrics();

        tracing::info!("prometheus metrics recorder installed");

        Ok(Self { handle })
    }

    /// Render all collected metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.handle.render()
    }

    /// Handle for sharing the render function with the HTTP layer.
    pub fn handle(&self) -> PrometheusHandle {
        self.handle.clone()
    }
}
