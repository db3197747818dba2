// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Recording goes through the metrics-rs facade, so these are no-ops until a
//! recorder is installed.

use interceptor_core::Verdict;
use metrics::{describe_counter, describe_histogram};

/// Register metric descriptions. Called once after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "interceptor_routing_decisions_total",
        "Routing decisions made"
    );
    describe_counter!(
        "interceptor_specialist_selected_total",
        "Times each specialist was selected"
    );
    describe_counter!("interceptor_predictions_total", "Predictions by verdict");
    describe_histogram!(
        "interceptor_prediction_latency_seconds",
        "Time from upload received to response built"
    );
}

/// Record one routing decision and the specialists it selected.
pub fn record_routing<'a>(specialists: impl IntoIterator<Item = &'a str>) {
    metrics::counter!("interceptor_routing_decisions_total").increment(1);
    for specialist in specialists {
        metrics::counter!(
            "interceptor_specialist_selected_total",
            "specialist" => specialist.to_string()
        )
        .increment(1);
    }
}

/// Record a prediction verdict.
pub fn record_prediction(verdict: Verdict) {
    metrics::counter!("interceptor_predictions_total", "verdict" => verdict.to_string())
        .increment(1);
}

/// Record end-to-end prediction latency.
pub fn record_prediction_latency(seconds: f64) {
    metrics::histogram!("interceptor_prediction_latency_seconds").record(seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_noop() {
        register_metrics();
        record_routing(["BG-Model N", "TM-Model"]);
        record_prediction(Verdict::Real);
        record_prediction_latency(0.01);
    }
}
