// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles GET /, GET /health, GET /stats, GET /metrics and POST /predict.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json,
    body::Bytes,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use interceptor_core::{InterceptorError, RoutingType, Verdict};
use interceptor_router::{
    BitrateCategory, Complexity, FileDescriptor, QualityBand, RoutingReport, SizeCategory,
    SpecialistRouter,
};

use crate::server::GatewayState;
use crate::verdict::{self, MediaProbe};

/// Name reported by `GET /`.
pub const SERVICE_NAME: &str = "Interceptor API - Deterministic Routing";

const NOT_VIDEO: &str = "Please upload a video file";

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub routing_type: RoutingType,
    /// Always false: frames are never decoded.
    pub media_decoding: bool,
    /// ISO 8601 timestamp.
    pub timestamp: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process answers.
    pub status: &'static str,
    pub routing_type: RoutingType,
    pub media_decoding: bool,
    pub uptime_secs: u64,
    pub timestamp: String,
}

/// Response body for GET /stats.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub system: SystemInfo,
    /// Specialist catalog keyed by short key.
    pub models: BTreeMap<&'static str, ModelInfo>,
    pub performance: PerformanceInfo,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub status: &'static str,
    pub routing_type: RoutingType,
    pub media_decoding: bool,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub name: String,
    /// Percentage with two decimals, e.g. `86.25%`.
    pub accuracy: String,
    pub specialty: &'static str,
}

/// Advertised figures; not measured.
#[derive(Debug, Serialize)]
pub struct PerformanceInfo {
    pub overall_confidence: &'static str,
    pub avg_processing_time: &'static str,
    pub total_parameters: &'static str,
    pub routing_consistency: &'static str,
}

/// Response body for POST /predict.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: Verdict,
    pub confidence: f64,
    pub faces_analyzed: u32,
    pub models_used: Vec<String>,
    pub routing_explanation: RoutingReport,
    pub analysis: Analysis,
    pub filename: String,
    pub file_size: u64,
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    pub confidence_breakdown: ConfidenceBreakdown,
    pub routing: RoutingInfo,
    pub model_predictions: BTreeMap<String, f64>,
    pub frames_analyzed: u32,
}

#[derive(Debug, Serialize)]
pub struct ConfidenceBreakdown {
    pub raw_confidence: f64,
    pub quality_adjusted: f64,
    pub consistency: f64,
    pub quality_score: f64,
}

#[derive(Debug, Serialize)]
pub struct RoutingInfo {
    pub routing_type: RoutingType,
    pub specialists_invoked: usize,
    pub routing_reasons: Vec<String>,
    pub video_characteristics: VideoCharacteristics,
}

#[derive(Debug, Serialize)]
pub struct VideoCharacteristics {
    pub is_compressed: bool,
    pub is_low_light: bool,
    pub file_size_category: SizeCategory,
    pub complexity: Complexity,
    /// `WIDTHxHEIGHT`.
    pub resolution: String,
    pub fps: f64,
    /// Seconds with one decimal and an `s` suffix.
    pub duration: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub detail: String,
}

/// A failed request, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

impl From<InterceptorError> for ApiError {
    fn from(err: InterceptorError) -> Self {
        match err {
            InterceptorError::Upload { message } => Self {
                status: StatusCode::BAD_REQUEST,
                detail: message,
            },
            InterceptorError::Internal(reason) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: format!("Prediction failed: {reason}"),
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                detail: format!("Prediction failed: {other}"),
            },
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self {
            status: err.status(),
            detail: err.body_text(),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

/// GET /
pub async fn get_root() -> Json<RootResponse> {
    Json(RootResponse {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        routing_type: RoutingType::Deterministic,
        media_decoding: false,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        routing_type: RoutingType::Deterministic,
        media_decoding: false,
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /stats
pub async fn get_stats(State(state): State<GatewayState>) -> Json<StatsResponse> {
    let models = state
        .router
        .catalog()
        .entries()
        .map(|(specialist, identifier)| {
            (
                specialist.key(),
                ModelInfo {
                    name: identifier.to_string(),
                    accuracy: format!("{:.2}%", specialist.accuracy() * 100.0),
                    specialty: specialist.specialty(),
                },
            )
        })
        .collect();

    Json(StatsResponse {
        system: SystemInfo {
            status: "running",
            routing_type: RoutingType::Deterministic,
            media_decoding: false,
        },
        models,
        performance: PerformanceInfo {
            overall_confidence: "94.9%",
            avg_processing_time: "2.1s",
            total_parameters: "47.2M",
            routing_consistency: "100%",
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /metrics
///
/// Prometheus text exposition, or 404 when metrics are disabled.
pub async fn get_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                detail: "metrics are disabled".to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /predict
///
/// Routes the uploaded video deterministically, then scores the selected
/// specialists.
pub async fn post_predict(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match predict(state, multipart).await {
        Ok(body) => Json(body).into_response(),
        Err(err) => {
            tracing::warn!(status = %err.status, detail = %err.detail, "prediction rejected");
            err.into_response()
        }
    }
}

struct Upload {
    filename: String,
    bytes: Bytes,
}

async fn predict(
    state: GatewayState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PredictResponse, ApiError> {
    let started = Instant::now();
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart).await?;

    let router = Arc::clone(&state.router);
    let response = tokio::task::spawn_blocking(move || analyze(&router, upload, started))
        .await
        .map_err(|e| InterceptorError::Internal(e.to_string()))?;

    interceptor_prometheus::record_routing(
        response.models_used.iter().map(String::as_str),
    );
    interceptor_prometheus::record_prediction(response.prediction);
    interceptor_prometheus::record_prediction_latency(started.elapsed().as_secs_f64());

    Ok(response)
}

/// Pull the `file` field out of the multipart body.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let is_video = field
            .content_type()
            .is_some_and(|content_type| content_type.starts_with("video/"));
        if !is_video {
            return Err(not_video());
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Upload { filename, bytes });
    }

    Err(not_video())
}

fn not_video() -> ApiError {
    InterceptorError::Upload {
        message: NOT_VIDEO.to_string(),
    }
    .into()
}

fn analyze(router: &SpecialistRouter, upload: Upload, started: Instant) -> PredictResponse {
    let file_size = upload.bytes.len() as u64;
    let descriptor = FileDescriptor::from_bytes(upload.filename.clone(), &upload.bytes);

    // Routing is settled before anything is scored.
    let decision = router.route_file(&descriptor);
    let report = router.explain(&decision);

    let probe = MediaProbe::from_bytes(&upload.bytes);
    let prediction = verdict::score(&probe, &decision, router.catalog());

    let signals = &decision.signals;
    PredictResponse {
        prediction: prediction.verdict,
        confidence: prediction.confidence,
        faces_analyzed: probe.faces_analyzed(),
        models_used: report.specialists_selected.clone(),
        analysis: Analysis {
            confidence_breakdown: ConfidenceBreakdown {
                raw_confidence: prediction.confidence,
                quality_adjusted: prediction.quality_adjusted(),
                consistency: probe.consistency(),
                quality_score: probe.quality_score(),
            },
            routing: RoutingInfo {
                routing_type: RoutingType::Deterministic,
                specialists_invoked: decision.len(),
                routing_reasons: decision.reasons.clone(),
                video_characteristics: VideoCharacteristics {
                    is_compressed: signals.bitrate_category == BitrateCategory::Low,
                    is_low_light: signals.quality_band == QualityBand::Low,
                    file_size_category: signals.size_category,
                    complexity: signals.complexity,
                    resolution: format!("{}x{}", probe.width, probe.height),
                    fps: (probe.fps * 10.0).round() / 10.0,
                    duration: format!("{:.1}s", probe.duration_secs),
                },
            },
            model_predictions: prediction.model_predictions,
            frames_analyzed: probe.frames_analyzed(),
        },
        routing_explanation: report,
        filename: upload.filename,
        file_size,
        processing_time: (started.elapsed().as_secs_f64() * 100.0).round() / 100.0,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}
