// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Interceptor crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How specialists were selected for a request.
///
/// Only deterministic routing exists; the tag is still emitted so clients of the
/// earlier confidence-driven service can tell the two apart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingType {
    Deterministic,
}

/// Final fake/real label attached to a prediction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Fake,
    Real,
}
