// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for deterministic deepfake screening.
//!
//! Uploads are routed to specialists from file-level signals only, then scored.
//! The whole request is handled in memory; nothing is written to disk.

pub mod handlers;
pub mod server;
pub mod verdict;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use interceptor_core::InterceptorError;
use interceptor_router::SpecialistRouter;

pub use server::{GatewayState, HealthState, ServerConfig, build_router, start_server};

/// A configured gateway, ready to serve.
#[derive(Clone)]
pub struct Gateway {
    config: ServerConfig,
    state: GatewayState,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("config", &self.config)
            .field(
                "prometheus_render",
                &self.state.health.prometheus_render.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

impl Gateway {
    /// Create a gateway with metrics disabled.
    pub fn new(config: ServerConfig, router: SpecialistRouter) -> Self {
        Self {
            config,
            state: GatewayState {
                router: Arc::new(router),
                health: HealthState {
                    start_time: std::time::Instant::now(),
                    prometheus_render: None,
                },
            },
        }
    }

    /// Expose Prometheus metrics at `/metrics` through `render`.
    pub fn with_metrics(mut self, render: Arc<dyn Fn() -> String + Send + Sync>) -> Self {
        self.state.health.prometheus_render = Some(render);
        self
    }

    /// Bound configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The axum router this gateway serves.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), self.config.max_upload_bytes)
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), InterceptorError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        start_server(&self.config, self.state, shutdown).await
    }
}
