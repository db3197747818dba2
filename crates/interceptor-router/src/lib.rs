// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic specialist routing for uploaded videos.
//!
//! This crate provides:
//! - [`extract`]: reproducible signals from a file's size, name and first KiB
//! - [`route`]: a fixed, ordered rule table selecting specialists with reasons
//! - [`explain`] / [`summarize`]: stable JSON-ready projections of a decision
//! - [`SpecialistRouter`]: the three stages wired together with logging
//!
//! Nothing here performs I/O beyond the bounded prefix read, holds shared state
//! or can fail: identical inputs always yield identical decisions.

pub mod policy;
pub mod report;
pub mod signals;
pub mod specialist;

pub use policy::{Rule, RoutingDecision, SpecialistRouter, route, rules};
pub use report::{RoutingReport, RoutingSummary, explain, summarize};
pub use signals::{
    BitrateCategory, Complexity, DIGEST_PREFIX_BYTES, FileDescriptor, FilenameFlags, QualityBand,
    SignalBundle, SizeCategory, extract,
};
pub use specialist::{Specialist, SpecialistCatalog};
