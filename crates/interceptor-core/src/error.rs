// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Interceptor service.

use thiserror::Error;

/// The primary error type used by the gateway, the metrics adapter and the binary.
///
/// Signal extraction and routing are total functions and never produce one of these.
#[derive(Debug, Error)]
pub enum InterceptorError {
    /// Configuration errors (invalid TOML, failed validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// Local I/O failures (reading a file for offline routing).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected or unreadable upload (wrong content type, broken multipart body).
    #[error("upload error: {message}")]
    Upload { message: String },

    /// HTTP server errors (bind failure, serve loop failure).
    #[error("server error: {message}")]
    Server {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
