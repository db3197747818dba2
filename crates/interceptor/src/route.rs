// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `interceptor route`: offline routing of a local file.

use std::fs::File;
use std::path::Path;

use interceptor_config::InterceptorConfig;
use interceptor_core::InterceptorError;
use interceptor_router::{FileDescriptor, RoutingReport, SpecialistRouter};

/// Route the file at `path` and print the report as pretty JSON.
pub fn run_route(
    config: &InterceptorConfig,
    path: &Path,
    name: Option<&str>,
) -> Result<(), InterceptorError> {
    let router = SpecialistRouter::new(&config.routing);
    let report = route_path(&router, path, name)?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| InterceptorError::Internal(format!("failed to encode report: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Build a descriptor from file metadata and its leading bytes, then route it.
///
/// Only the digest prefix is read; the rest of the file is never touched.
pub fn route_path(
    router: &SpecialistRouter,
    path: &Path,
    name: Option<&str>,
) -> Result<RoutingReport, InterceptorError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    let filename = match name {
        Some(name) => name.to_string(),
        None => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let descriptor = FileDescriptor::from_reader(filename, size, file);
    let decision = router.route_file(&descriptor);
    Ok(router.explain(&decision))
}
