// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Presentation records for routing decisions.
//!
//! Pure projections: specialist membership and reason order are copied from the
//! decision untouched.

use interceptor_core::RoutingType;
use serde::Serialize;

use crate::policy::RoutingDecision;
use crate::signals::{
    BitrateCategory, Complexity, FilenameFlags, QualityBand, SignalBundle, SizeCategory,
};
use crate::specialist::SpecialistCatalog;

/// Promise attached to every explanation.
pub const CONSISTENCY_GUARANTEE: &str =
    "This routing decision will be identical for this file every time";

/// One-line description of the pipeline.
pub const ROUTING_LOGIC: &str =
    "File-based characteristics → Policy rules → Specialist selection";

/// Explanation of a routing decision for end users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingReport {
    pub routing_decision: RoutingType,
    pub consistency_guarantee: &'static str,
    pub specialists_selected: Vec<String>,
    pub total_specialists: usize,
    pub routing_reasons: Vec<String>,
    pub deterministic_signals: SignalView,
    pub routing_logic: &'static str,
}

/// Signals grouped by what they describe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalView {
    pub file_characteristics: FileCharacteristics,
    pub filename_analysis: FilenameFlags,
    pub file_format: String,
}

/// Size- and hash-derived signals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileCharacteristics {
    pub size_mb: f64,
    pub size_category: SizeCategory,
    pub bitrate_category: BitrateCategory,
    pub quality_band: QualityBand,
    pub complexity: Complexity,
}

impl SignalView {
    fn from_signals(signals: &SignalBundle) -> Self {
        Self {
            file_characteristics: FileCharacteristics {
                size_mb: signals.size_mb,
                size_category: signals.size_category,
                bitrate_category: signals.bitrate_category,
                quality_band: signals.quality_band,
                complexity: signals.complexity,
            },
            filename_analysis: signals.filename_flags,
            file_format: signals.extension.clone(),
        }
    }
}

/// Compact routing record merged into API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingSummary {
    pub specialists_selected: Vec<String>,
    pub routing_reasons: Vec<String>,
    pub routing_type: RoutingType,
    pub signals_used: SignalBundle,
}

/// Restate a decision as an explanation record.
pub fn explain(decision: &RoutingDecision, catalog: &SpecialistCatalog) -> RoutingReport {
    let specialists_selected = decision.identifiers(catalog);
    RoutingReport {
        routing_decision: RoutingType::Deterministic,
        consistency_guarantee: CONSISTENCY_GUARANTEE,
        total_specialists: specialists_selected.len(),
        specialists_selected,
        routing_reasons: decision.reasons.clone(),
        deterministic_signals: SignalView::from_signals(&decision.signals),
        routing_logic: ROUTING_LOGIC,
    }
}

/// Restate a decision in the `signals_used` shape.
pub fn summarize(decision: &RoutingDecision, catalog: &SpecialistCatalog) -> RoutingSummary {
    RoutingSummary {
        specialists_selected: decision.identifiers(catalog),
        routing_reasons: decision.reasons.clone(),
        routing_type: RoutingType::Deterministic,
        signals_used: decision.signals.clone(),
    }
}
