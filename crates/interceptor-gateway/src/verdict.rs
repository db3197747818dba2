// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-routing verdict scoring.
//!
//! Scores are derived from a digest of the upload, not from any model output.
//! They are computed only after routing so they can never influence which
//! specialists are selected.

use std::collections::BTreeMap;

use interceptor_core::Verdict;
use interceptor_router::{RoutingDecision, SpecialistCatalog};

/// How much of the upload the probe digest covers.
pub const PROBE_PREFIX_BYTES: usize = 100 * 1024;

const MIN_CONFIDENCE: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.99;

/// Media characteristics reported alongside a prediction.
///
/// Frames are never decoded, so everything except the digest is a fixed default.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaProbe {
    pub fps: f64,
    pub width: u32,
    pub height: u32,
    pub frame_count: u32,
    pub duration_secs: f64,
    pub brightness: f64,
    digest: [u8; 16],
}

impl MediaProbe {
    /// Probe an in-memory upload, hashing at most [`PROBE_PREFIX_BYTES`].
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let end = bytes.len().min(PROBE_PREFIX_BYTES);
        Self::with_digest(md5::compute(&bytes[..end]).0)
    }

    /// Probe with a known digest and default media characteristics.
    pub fn with_digest(digest: [u8; 16]) -> Self {
        Self {
            fps: 30.0,
            width: 1280,
            height: 720,
            frame_count: 100,
            duration_secs: 3.33,
            brightness: 128.0,
            digest,
        }
    }

    /// First eight hex characters of the digest as an integer.
    pub fn hash_prefix(&self) -> u32 {
        u32::from_be_bytes([self.digest[0], self.digest[1], self.digest[2], self.digest[3]])
    }

    /// Faces assumed analyzed: one per second of 30 fps video, at least one.
    pub fn faces_analyzed(&self) -> u32 {
        (self.frame_count / 30).max(1)
    }

    /// Frames sampled for the breakdown, capped at 30.
    pub fn frames_analyzed(&self) -> u32 {
        self.frame_count.min(30)
    }

    /// Brightness relative to mid-grey, capped at 1.
    pub fn quality_score(&self) -> f64 {
        round4((self.brightness / 128.0).min(1.0))
    }

    /// Stable pseudo-consistency figure in `[0.85, 0.99]`.
    pub fn consistency(&self) -> f64 {
        round4(0.85 + f64::from(self.hash_prefix() % 15) / 100.0)
    }
}

/// Scored outcome for one upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub verdict: Verdict,
    pub confidence: f64,
    /// Per-specialist scores keyed by display identifier.
    pub model_predictions: BTreeMap<String, f64>,
    pub confidence_modifier: f64,
}

impl Prediction {
    /// Confidence after the brightness modifier.
    pub fn quality_adjusted(&self) -> f64 {
        round4(self.confidence * self.confidence_modifier)
    }
}

/// Score the specialists a routing decision selected.
pub fn score(
    probe: &MediaProbe,
    decision: &RoutingDecision,
    catalog: &SpecialistCatalog,
) -> Prediction {
    let hash = u64::from(probe.hash_prefix());
    let base = (hash % 1000) as f64 / 1000.0;

    let model_predictions: BTreeMap<String, f64> = decision
        .specialists
        .iter()
        .map(|specialist| {
            let shift = specialist.key().as_bytes()[0] % 8;
            let variation = (((hash >> shift) % 200) as f64 - 100.0) / 1000.0;
            let confidence = round4((base + variation).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE));
            (catalog.identifier(*specialist).to_string(), confidence)
        })
        .collect();

    let mean = if model_predictions.is_empty() {
        base
    } else {
        model_predictions.values().sum::<f64>() / model_predictions.len() as f64
    };
    let confidence = round4(mean.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE));

    Prediction {
        verdict: if confidence > 0.5 {
            Verdict::Fake
        } else {
            Verdict::Real
        },
        confidence,
        model_predictions,
        confidence_modifier: brightness_modifier(probe.brightness),
    }
}

fn brightness_modifier(brightness: f64) -> f64 {
    if brightness < 80.0 {
        0.85
    } else if brightness > 200.0 {
        0.9
    } else {
        1.0
    }
}

/// Round to four decimal places.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
