// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Specialist identities and their display identifiers.

use interceptor_config::model::RoutingConfig;
use serde::{Deserialize, Serialize};

/// A downstream analysis module the router can select.
///
/// Declaration order is the rule-table order with the baseline first, so a
/// `BTreeSet<Specialist>` always iterates in the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialist {
    /// Background analysis. Selected for every file.
    Background,
    /// Compression artifact analysis.
    Compression,
    /// Lighting analysis.
    LowLight,
    /// Resolution consistency analysis.
    Resolution,
    /// Audio-visual sync analysis.
    AudioVisual,
    /// Temporal consistency analysis.
    Temporal,
}

impl Specialist {
    /// Every specialist, baseline first.
    pub const ALL: [Specialist; 6] = [
        Specialist::Background,
        Specialist::Compression,
        Specialist::LowLight,
        Specialist::Resolution,
        Specialist::AudioVisual,
        Specialist::Temporal,
    ];

    /// The specialist every routing decision includes.
    pub const BASELINE: Specialist = Specialist::Background;

    /// Two-letter catalog key (`bg`, `cm`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Specialist::Background => "bg",
            Specialist::Compression => "cm",
            Specialist::LowLight => "ll",
            Specialist::Resolution => "rr",
            Specialist::AudioVisual => "av",
            Specialist::Temporal => "tm",
        }
    }

    /// Model architecture label.
    pub fn architecture(self) -> &'static str {
        match self {
            Specialist::Temporal => "ResNet18",
            _ => "EfficientNet-B4",
        }
    }

    /// Reference accuracy published for the model (0.0-1.0).
    pub fn accuracy(self) -> f64 {
        match self {
            Specialist::Background => 0.8625,
            Specialist::Compression => 0.8083,
            Specialist::LowLight => 0.9342,
            Specialist::Resolution => 0.85,
            Specialist::AudioVisual => 0.93,
            Specialist::Temporal => 0.785,
        }
    }

    /// What the specialist looks at.
    pub fn specialty(self) -> &'static str {
        match self {
            Specialist::Background => "background_analysis",
            Specialist::Compression => "compression_artifacts",
            Specialist::LowLight => "lighting_analysis",
            Specialist::Resolution => "resolution_consistency",
            Specialist::AudioVisual => "audiovisual_sync",
            Specialist::Temporal => "temporal_consistency",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Display identifiers for each specialist, loaded once from `[routing]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistCatalog {
    identifiers: [String; 6],
}

impl SpecialistCatalog {
    /// Build the catalog from routing configuration.
    pub fn from_config(config: &RoutingConfig) -> Self {
        Self {
            identifiers: [
                config.baseline_model.clone(),
                config.compression_model.clone(),
                config.low_light_model.clone(),
                config.resolution_model.clone(),
                config.audio_visual_model.clone(),
                config.temporal_model.clone(),
            ],
        }
    }

    /// Display identifier for a specialist.
    pub fn identifier(&self, specialist: Specialist) -> &str {
        &self.identifiers[specialist.index()]
    }

    /// Reverse lookup from display identifier.
    pub fn lookup(&self, identifier: &str) -> Option<Specialist> {
        Specialist::ALL
            .into_iter()
            .find(|s| self.identifier(*s) == identifier)
    }

    /// Specialists paired with their identifiers, baseline first.
    pub fn entries(&self) -> impl Iterator<Item = (Specialist, &str)> {
        Specialist::ALL
            .into_iter()
            .map(move |s| (s, self.identifier(s)))
    }
}

impl Default for SpecialistCatalog {
    fn default() -> Self {
        Self::from_config(&RoutingConfig::default())
    }
}
