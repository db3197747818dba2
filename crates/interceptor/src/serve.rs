// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `interceptor serve`: run the HTTP gateway until a shutdown signal arrives.

use std::sync::Arc;

use interceptor_config::InterceptorConfig;
use interceptor_core::InterceptorError;
use interceptor_gateway::{Gateway, ServerConfig};
use interceptor_prometheus::PrometheusAdapter;
use interceptor_router::SpecialistRouter;
use tracing::{info, warn};

/// Runs the `interceptor serve` command.
pub async fn run_serve(config: InterceptorConfig) -> Result<(), InterceptorError> {
    init_tracing(&config.server.log_level);

    info!("starting interceptor serve");

    let router = SpecialistRouter::new(&config.routing);
    for (specialist, identifier) in router.catalog().entries() {
        info!(key = specialist.key(), identifier, "specialist registered");
    }

    let mut gateway = Gateway::new(
        ServerConfig {
            host: config.server.host.clone(),
            port: config.server.port,
            max_upload_bytes: config.server.max_upload_bytes(),
        },
        router,
    );

    if config.metrics.enabled {
        let adapter = PrometheusAdapter::new()?;
        let handle = adapter.handle();
        gateway = gateway.with_metrics(Arc::new(move || handle.render()));
    } else {
        info!("metrics disabled");
    }

    gateway.serve(shutdown_signal()).await?;

    info!("interceptor serve shutdown complete");
    Ok(())
}

/// Resolves on SIGINT (Ctrl+C) or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                    _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler, waiting for Ctrl+C only");
                let _ = ctrl_c.await;
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("interceptor={log_level},tower_http={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
