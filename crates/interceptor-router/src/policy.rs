// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rule-based specialist selection.
//!
//! The baseline specialist is always selected. Five independent rules are then
//! evaluated in table order; each may add one specialist and one reason. No rule
//! removes anything and there is no early exit.

use std::collections::BTreeSet;

use interceptor_config::model::RoutingConfig;
use tracing::{debug, info};

use crate::report::{self, RoutingReport, RoutingSummary};
use crate::signals::{
    BitrateCategory, Complexity, FileDescriptor, QualityBand, SignalBundle, SizeCategory, extract,
};
use crate::specialist::{Specialist, SpecialistCatalog};

/// Container formats that trigger a resolution check on their own.
const RESOLUTION_SUSPECT_EXTENSIONS: &[&str] = &["webm", "mkv"];

/// One entry of the routing table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short rule name used in logs.
    pub name: &'static str,
    /// Specialist added when the rule fires.
    pub specialist: Specialist,
    triggers: fn(&SignalBundle) -> bool,
    reason: fn(&SignalBundle) -> String,
}

impl Rule {
    /// Whether this rule fires for the given signals.
    pub fn triggers(&self, signals: &SignalBundle) -> bool {
        (self.triggers)(signals)
    }

    /// Justification recorded when the rule fires.
    pub fn reason(&self, signals: &SignalBundle) -> String {
        (self.reason)(signals)
    }
}

/// The routing table, in evaluation order. The reason list follows this order.
static RULES: [Rule; 5] = [
    Rule {
        name: "compression",
        specialist: Specialist::Compression,
        triggers: compression_triggers,
        reason: compression_reason,
    },
    Rule {
        name: "low_light",
        specialist: Specialist::LowLight,
        triggers: low_light_triggers,
        reason: low_light_reason,
    },
    Rule {
        name: "resolution",
        specialist: Specialist::Resolution,
        triggers: resolution_triggers,
        reason: resolution_reason,
    },
    Rule {
        name: "audio_visual",
        specialist: Specialist::AudioVisual,
        triggers: audio_visual_triggers,
        reason: audio_visual_reason,
    },
    Rule {
        name: "temporal",
        specialist: Specialist::Temporal,
        triggers: temporal_triggers,
        reason: temporal_reason,
    },
];

/// The fixed routing table.
pub fn rules() -> &'static [Rule] {
    &RULES
}

fn compression_triggers(s: &SignalBundle) -> bool {
    s.bitrate_category == BitrateCategory::Low
        || s.size_category == SizeCategory::Small
        || s.filename_flags.compressed_keyword
        || s.filename_flags.social_keyword
}

fn compression_reason(s: &SignalBundle) -> String {
    format!(
        "Compression artifacts likely: {} bitrate, {} file size",
        s.bitrate_category, s.size_category
    )
}

fn low_light_triggers(s: &SignalBundle) -> bool {
    s.complexity == Complexity::LowComplexity
        || s.quality_band == QualityBand::Low
        || s.filename_flags.mobile_keyword
}

fn low_light_reason(s: &SignalBundle) -> String {
    format!(
        "Low-light conditions likely: {} complexity, {} quality band",
        s.complexity, s.quality_band
    )
}

fn resolution_triggers(s: &SignalBundle) -> bool {
    (s.size_category == SizeCategory::Large && s.filename_flags.mobile_keyword)
        || (s.size_category == SizeCategory::Small && s.filename_flags.hd_keyword)
        || RESOLUTION_SUSPECT_EXTENSIONS.contains(&s.extension.as_str())
}

fn resolution_reason(_: &SignalBundle) -> String {
    "Resolution inconsistencies likely: size/format mismatch detected".to_string()
}

fn audio_visual_triggers(s: &SignalBundle) -> bool {
    s.size_mb > 2.0 && !s.filename_flags.compressed_keyword
}

fn audio_visual_reason(_: &SignalBundle) -> String {
    "Audio-visual analysis: file size suggests audio content present".to_string()
}

fn temporal_triggers(s: &SignalBundle) -> bool {
    s.size_mb > 10.0 || s.complexity == Complexity::HighComplexity
}

fn temporal_reason(s: &SignalBundle) -> String {
    format!(
        "Temporal analysis: {}MB file with {} complexity",
        format_megabytes(s.size_mb),
        s.complexity
    )
}

/// Render megabytes the way a decimal float prints: always one fractional digit at least.
fn format_megabytes(mb: f64) -> String {
    if mb.is_finite() && mb.fract() == 0.0 {
        format!("{mb:.1}")
    } else {
        format!("{mb}")
    }
}

/// Selected specialists, ordered reasons and the signals behind them.
///
/// Equality compares specialists as a set.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingDecision {
    /// Selected specialists. Always contains [`Specialist::BASELINE`].
    pub specialists: BTreeSet<Specialist>,
    /// One reason per fired rule, in rule-table order.
    pub reasons: Vec<String>,
    /// Signals the rules were evaluated against.
    pub signals: SignalBundle,
}

impl RoutingDecision {
    /// Whether a specialist was selected.
    pub fn contains(&self, specialist: Specialist) -> bool {
        self.specialists.contains(&specialist)
    }

    /// Number of selected specialists, baseline included.
    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    /// Always false; the baseline is always present.
    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }

    /// Display identifiers of the selected specialists, baseline first.
    pub fn identifiers(&self, catalog: &SpecialistCatalog) -> Vec<String> {
        self.specialists
            .iter()
            .map(|s| catalog.identifier(*s).to_string())
            .collect()
    }
}

/// Evaluate the routing table against a signal bundle. Total and pure.
pub fn route(signals: SignalBundle) -> RoutingDecision {
    let mut specialists = BTreeSet::from([Specialist::BASELINE]);
    let mut reasons = Vec::new();

    for rule in rules() {
        if rule.triggers(&signals) {
            debug!(rule = rule.name, specialist = %rule.specialist, "routing rule fired");
            specialists.insert(rule.specialist);
            reasons.push(rule.reason(&signals));
        }
    }

    RoutingDecision {
        specialists,
        reasons,
        signals,
    }
}

/// Extraction, routing and reporting wired together behind configured identifiers.
#[derive(Debug, Clone, Default)]
pub struct SpecialistRouter {
    catalog: SpecialistCatalog,
}

impl SpecialistRouter {
    /// Create a router using the identifiers from `[routing]`.
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            catalog: SpecialistCatalog::from_config(config),
        }
    }

    /// Identifier catalog used for reports.
    pub fn catalog(&self) -> &SpecialistCatalog {
        &self.catalog
    }

    /// Extract signals from a file and route them.
    pub fn route_file(&self, descriptor: &FileDescriptor) -> RoutingDecision {
        let decision = route(extract(descriptor));
        info!(
            specialists = decision.len(),
            reasons = decision.reasons.len(),
            size_category = %decision.signals.size_category,
            complexity = %decision.signals.complexity,
            "deterministic routing decision"
        );
        decision
    }

    /// Explanation record for a decision.
    pub fn explain(&self, decision: &RoutingDecision) -> RoutingReport {
        report::explain(decision, &self.catalog)
    }

    /// Compact `specialists_selected` / `signals_used` record for a decision.
    pub fn summarize(&self, decision: &RoutingDecision) -> RoutingSummary {
        report::summarize(decision, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::FilenameFlags;

    fn bundle() -> SignalBundle {
        SignalBundle {
            size_mb: 7.0,
            size_category: SizeCategory::Medium,
            bitrate_category: BitrateCategory::Medium,
            digest_hex: "f".repeat(32),
            complexity: Complexity::HighComplexity,
            filename_flags: FilenameFlags::default(),
            extension: "mp4".to_string(),
            quality_band: QualityBand::High,
        }
    }

    #[test]
    fn baseline_always_present() {
        let decision = route(bundle());
        assert!(decision.contains(Specialist::BASELINE));
        assert!(!decision.is_empty());
    }

    #[test]
    fn compressed_small_file() {
        // size=1,000,000 bytes, "clip_compressed.mp4"
        let decision = route(extract(&FileDescriptor::new(
            "clip_compressed.mp4",
            1_000_000,
            None,
        )));
        assert_eq!(decision.signals.bitrate_category, BitrateCategory::Low);
        assert_eq!(decision.signals.size_category, SizeCategory::Small);
        assert!(decision.signals.filename_flags.compressed_keyword);
        assert!(decision.contains(Specialist::Compression));
        assert!(!decision.contains(Specialist::AudioVisual));
        assert_eq!(
            decision.reasons[0],
            "Compression artifacts likely: LOW bitrate, SMALL file size"
        );
    }

    #[test]
    fn mobile_medium_file() {
        // size=15,000,000 bytes, "mobile_video.mov"
        let decision = route(extract(&FileDescriptor::new(
            "mobile_video.mov",
            15_000_000,
            None,
        )));
        assert_eq!(decision.signals.size_category, SizeCategory::Medium);
        assert!(decision.signals.filename_flags.mobile_keyword);
        assert!(decision.contains(Specialist::LowLight));
        assert!(decision.contains(Specialist::Temporal));
        assert!(decision.contains(Specialist::AudioVisual));
        assert!(!decision.contains(Specialist::Compression));
        assert!(!decision.contains(Specialist::Resolution));
        let temporal = decision.reasons.last().unwrap();
        assert!(temporal.starts_with("Temporal analysis: 14.31MB file with "));
    }

    #[test]
    fn temporal_reason_uses_tie_to_even_megabytes() {
        // 11,665,408 bytes is exactly 11.125 MiB.
        let decision = route(extract(&FileDescriptor::new("clip.mp4", 11_665_408, None)));
        let temporal = decision.reasons.last().unwrap();
        assert!(temporal.starts_with("Temporal analysis: 11.12MB file with "));
    }

    #[test]
    fn tiny_file_without_extension() {
        // size=200 bytes, name "a"
        let decision = route(extract(&FileDescriptor::new("a", 200, None)));
        assert_eq!(decision.signals.extension, "unknown");
        assert_eq!(decision.signals.size_category, SizeCategory::Small);
        assert!(decision.contains(Specialist::Compression));
        assert!(!decision.contains(Specialist::AudioVisual));
    }

    #[test]
    fn resolution_triggers_on_container_format() {
        let mut s = bundle();
        s.extension = "webm".to_string();
        assert!(route(s.clone()).contains(Specialist::Resolution));
        s.extension = "mkv".to_string();
        assert!(route(s.clone()).contains(Specialist::Resolution));
        s.extension = "mp4".to_string();
        assert!(!route(s).contains(Specialist::Resolution));
    }

    #[test]
    fn resolution_triggers_on_size_name_mismatch() {
        let mut large_mobile = bundle();
        large_mobile.size_category = SizeCategory::Large;
        large_mobile.filename_flags.mobile_keyword = true;
        assert!(route(large_mobile).contains(Specialist::Resolution));

        let mut small_hd = bundle();
        small_hd.size_category = SizeCategory::Small;
        small_hd.filename_flags.hd_keyword = true;
        assert!(route(small_hd).contains(Specialist::Resolution));

        let mut medium_hd = bundle();
        medium_hd.filename_flags.hd_keyword = true;
        assert!(!route(medium_hd).contains(Specialist::Resolution));
    }

    #[test]
    fn social_keyword_triggers_compression() {
        let mut s = bundle();
        s.filename_flags.social_keyword = true;
        assert!(route(s).contains(Specialist::Compression));
    }

    #[test]
    fn audio_visual_boundary_is_exclusive() {
        let mut s = bundle();
        s.size_mb = 2.0;
        assert!(!route(s.clone()).contains(Specialist::AudioVisual));
        s.size_mb = 2.01;
        assert!(route(s).contains(Specialist::AudioVisual));
    }

    #[test]
    fn temporal_on_size_alone() {
        let mut s = bundle();
        s.complexity = Complexity::LowComplexity;
        s.size_mb = 10.0;
        assert!(!route(s.clone()).contains(Specialist::Temporal));
        s.size_mb = 10.01;
        assert!(route(s).contains(Specialist::Temporal));
    }

    #[test]
    fn reasons_follow_rule_order() {
        let mut s = bundle();
        s.size_mb = 30.0;
        s.size_category = SizeCategory::Large;
        s.bitrate_category = BitrateCategory::Low;
        s.complexity = Complexity::LowComplexity;
        s.extension = "mkv".to_string();
        let decision = route(s);
        assert_eq!(decision.len(), 6);
        let prefixes = [
            "Compression artifacts likely",
            "Low-light conditions likely",
            "Resolution inconsistencies likely",
            "Audio-visual analysis",
            "Temporal analysis",
        ];
        assert_eq!(decision.reasons.len(), prefixes.len());
        for (reason, prefix) in decision.reasons.iter().zip(prefixes) {
            assert!(reason.starts_with(prefix), "{reason} should start with {prefix}");
        }
    }

    #[test]
    fn high_complexity_alone_adds_temporal() {
        let mut s = bundle();
        s.size_mb = 1.5;
        let decision = route(s);
        assert_eq!(
            decision.specialists,
            BTreeSet::from([Specialist::Background, Specialist::Temporal])
        );
    }

    #[test]
    fn temporal_reason_formats_whole_megabytes_with_decimal() {
        assert_eq!(format_megabytes(15.0), "15.0");
        assert_eq!(format_megabytes(14.31), "14.31");
        assert_eq!(format_megabytes(0.0), "0.0");
        assert_eq!(format_megabytes(0.5), "0.5");
    }

    #[test]
    fn router_uses_configured_identifiers() {
        let config = RoutingConfig {
            baseline_model: "BG-Model v9".to_string(),
            ..RoutingConfig::default()
        };
        let router = SpecialistRouter::new(&config);
        let decision = router.route_file(&FileDescriptor::new("a", 200, None));
        let ids = decision.identifiers(router.catalog());
        assert_eq!(ids[0], "BG-Model v9");
        assert!(ids.contains(&"CM-Model N".to_string()));
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let names: Vec<_> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            ["compression", "low_light", "resolution", "audio_visual", "temporal"]
        );
    }
}
