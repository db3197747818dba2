// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for deterministic routing.
//!
//! Decisions must be reproducible, always include the baseline, select each
//! specialist exactly when its rule fires, and compare as sets.

use std::collections::BTreeSet;

use interceptor_router::{
    BitrateCategory, Complexity, FileDescriptor, FilenameFlags, QualityBand, RoutingDecision,
    SignalBundle, SizeCategory, Specialist, SpecialistCatalog, explain, extract, route, rules,
};
use proptest::prelude::*;

fn size_category() -> impl Strategy<Value = SizeCategory> {
    prop_oneof![
        Just(SizeCategory::Small),
        Just(SizeCategory::Medium),
        Just(SizeCategory::Large)
    ]
}

fn bitrate_category() -> impl Strategy<Value = BitrateCategory> {
    prop_oneof![
        Just(BitrateCategory::Low),
        Just(BitrateCategory::Medium),
        Just(BitrateCategory::High)
    ]
}

fn complexity() -> impl Strategy<Value = Complexity> {
    prop_oneof![
        Just(Complexity::LowComplexity),
        Just(Complexity::HighComplexity)
    ]
}

fn quality_band() -> impl Strategy<Value = QualityBand> {
    prop_oneof![
        Just(QualityBand::Low),
        Just(QualityBand::Medium),
        Just(QualityBand::High)
    ]
}

fn filename_flags() -> impl Strategy<Value = FilenameFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(c, h, m, s)| {
        FilenameFlags {
            compressed_keyword: c,
            hd_keyword: h,
            mobile_keyword: m,
            social_keyword: s,
        }
    })
}

fn extension() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("mp4".to_string()),
        Just("mov".to_string()),
        Just("webm".to_string()),
        Just("mkv".to_string()),
        Just("unknown".to_string()),
        "[a-z0-9]{0,5}",
    ]
}

/// Arbitrary bundles, including combinations extraction would never produce,
/// so the rule table is exercised on its own terms.
fn signal_bundle() -> impl Strategy<Value = SignalBundle> {
    (
        0.0f64..100.0,
        size_category(),
        bitrate_category(),
        "[0-9a-f]{32}",
        complexity(),
        filename_flags(),
        extension(),
        quality_band(),
    )
        .prop_map(
            |(size_mb, size_category, bitrate_category, digest_hex, complexity, filename_flags, extension, quality_band)| {
                SignalBundle {
                    size_mb,
                    size_category,
                    bitrate_category,
                    digest_hex,
                    complexity,
                    filename_flags,
                    extension,
                    quality_band,
                }
            },
        )
}

fn filename() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_ -]{0,24}(\\.[A-Za-z0-9]{0,5})?"
}

proptest! {
    #[test]
    fn routing_is_deterministic(
        bytes in prop::collection::vec(any::<u8>(), 0..4096),
        name in filename(),
    ) {
        let first = route(extract(&FileDescriptor::from_bytes(name.clone(), &bytes)));
        let second = route(extract(&FileDescriptor::from_bytes(name, &bytes)));
        prop_assert_eq!(&first.signals, &second.signals);
        prop_assert_eq!(&first.reasons, &second.reasons);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn size_only_descriptors_are_deterministic(size in any::<u64>(), name in filename()) {
        let first = route(extract(&FileDescriptor::new(name.clone(), size, None)));
        let second = route(extract(&FileDescriptor::new(name, size, None)));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn baseline_always_selected(signals in signal_bundle()) {
        prop_assert!(route(signals).contains(Specialist::BASELINE));
    }

    #[test]
    fn baseline_always_selected_for_real_files(size in any::<u64>(), name in filename()) {
        prop_assert!(route(extract(&FileDescriptor::new(name, size, None))).contains(Specialist::BASELINE));
    }

    #[test]
    fn each_specialist_tracks_only_its_rule(signals in signal_bundle()) {
        let decision = route(signals.clone());
        let mut fired = 0;
        for rule in rules() {
            let triggers = rule.triggers(&signals);
            prop_assert_eq!(decision.contains(rule.specialist), triggers, "rule {}", rule.name);
            if triggers {
                fired += 1;
            }
        }
        prop_assert_eq!(decision.reasons.len(), fired);
        prop_assert_eq!(decision.len(), fired + 1);
    }

    #[test]
    fn toggling_one_flag_only_moves_dependent_specialists(signals in signal_bundle()) {
        type Toggle = fn(&mut SignalBundle);
        let toggles: [(&str, Toggle, &[Specialist]); 4] = [
            ("compressed", |s| s.filename_flags.compressed_keyword ^= true,
                &[Specialist::Compression, Specialist::AudioVisual]),
            ("hd", |s| s.filename_flags.hd_keyword ^= true, &[Specialist::Resolution]),
            ("mobile", |s| s.filename_flags.mobile_keyword ^= true,
                &[Specialist::LowLight, Specialist::Resolution]),
            ("social", |s| s.filename_flags.social_keyword ^= true, &[Specialist::Compression]),
        ];
        let before = route(signals.clone());
        for (name, toggle, dependents) in toggles {
            let mut toggled = signals.clone();
            toggle(&mut toggled);
            let after = route(toggled);
            for s in Specialist::ALL.into_iter().filter(|s| !dependents.contains(s)) {
                prop_assert_eq!(before.contains(s), after.contains(s), "{} moved {}", name, s);
            }
        }
    }

    #[test]
    fn extension_only_moves_resolution(signals in signal_bundle(), other in extension()) {
        let mut renamed = signals.clone();
        renamed.extension = other;
        let before = route(signals);
        let after = route(renamed);
        for s in Specialist::ALL.into_iter().filter(|s| *s != Specialist::Resolution) {
            prop_assert_eq!(before.contains(s), after.contains(s), "extension moved {}", s);
        }
    }

    #[test]
    fn setting_a_flag_never_removes_a_specialist(signals in signal_bundle()) {
        // Every flag appears only positively in the rule table except the
        // compressed keyword, which gates audio-visual.
        let mut raised = signals.clone();
        raised.filename_flags.hd_keyword = true;
        raised.filename_flags.mobile_keyword = true;
        raised.filename_flags.social_keyword = true;
        let before = route(signals);
        let after = route(raised);
        prop_assert!(before.specialists.is_subset(&after.specialists));
    }

    #[test]
    fn report_preserves_decision(signals in signal_bundle()) {
        let catalog = SpecialistCatalog::default();
        let decision = route(signals);
        let report = explain(&decision, &catalog);
        prop_assert_eq!(report.total_specialists, decision.len());
        prop_assert_eq!(&report.routing_reasons, &decision.reasons);
        let from_report: BTreeSet<_> = report
            .specialists_selected
            .iter()
            .filter_map(|id| catalog.lookup(id))
            .collect();
        prop_assert_eq!(from_report, decision.specialists);
    }

    #[test]
    fn same_content_under_plain_names_differs_only_by_extension(
        bytes in prop::collection::vec(any::<u8>(), 1..2048),
    ) {
        let mp4 = extract(&FileDescriptor::from_bytes("clip.mp4", &bytes));
        let webm = extract(&FileDescriptor::from_bytes("clip.webm", &bytes));
        prop_assert_eq!(mp4.size_mb, webm.size_mb);
        prop_assert_eq!(&mp4.digest_hex, &webm.digest_hex);
        prop_assert_eq!(mp4.complexity, webm.complexity);
        prop_assert_eq!(mp4.quality_band, webm.quality_band);
        prop_assert_eq!(mp4.filename_flags, webm.filename_flags);

        let mp4_route = route(mp4);
        let webm_route = route(webm);
        prop_assert!(!mp4_route.contains(Specialist::Resolution) || mp4_route.signals.filename_flags.hd_keyword);
        prop_assert!(webm_route.contains(Specialist::Resolution));
        let mut without_rr = webm_route.specialists.clone();
        without_rr.remove(&Specialist::Resolution);
        let mut mp4_without_rr = mp4_route.specialists.clone();
        mp4_without_rr.remove(&Specialist::Resolution);
        prop_assert_eq!(without_rr, mp4_without_rr);
    }
}

#[test]
fn decisions_compare_as_sets() {
    let signals = extract(&FileDescriptor::new("a", 200, None));
    let forward = RoutingDecision {
        specialists: [Specialist::Background, Specialist::Compression, Specialist::Temporal]
            .into_iter()
            .collect(),
        reasons: vec!["r".to_string()],
        signals: signals.clone(),
    };
    let backward = RoutingDecision {
        specialists: [Specialist::Temporal, Specialist::Compression, Specialist::Background]
            .into_iter()
            .collect(),
        reasons: vec!["r".to_string()],
        signals,
    };
    assert_eq!(forward, backward);
}

#[test]
fn repeated_routing_of_one_upload_is_identical() {
    let bytes: Vec<u8> = (0..10_000u32).map(|i| (i * 31 % 256) as u8).collect();
    let decisions: Vec<_> = (0..5)
        .map(|_| route(extract(&FileDescriptor::from_bytes("test_video.mp4", &bytes))))
        .collect();
    assert!(decisions.windows(2).all(|w| w[0] == w[1]));
}
