// SPDX-FileCopyrightText: 2026 Interceptor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Interceptor service.
//!
//! Holds the error type and the handful of plain types shared between the
//! gateway, the metrics adapter and the binary.

pub mod error;
pub mod types;

pub use error::InterceptorError;
pub use types::{RoutingType, Verdict};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interceptor_error_has_all_variants() {
        let _config = InterceptorError::Config("test".into());
        let _io = InterceptorError::Io(std::io::Error::other("test"));
        let _upload = InterceptorError::Upload {
            message: "test".into(),
        };
        let _server = InterceptorError::Server {
            message: "test".into(),
            source: None,
        };
        let _internal = InterceptorError::Internal("test".into());
    }

    #[test]
    fn upload_error_display() {
        let err = InterceptorError::Upload {
            message: "Please upload a video file".into(),
        };
        assert_eq!(err.to_string(), "upload error: Please upload a video file");
    }

    #[test]
    fn routing_type_renders_uppercase() {
        assert_eq!(RoutingType::Deterministic.to_string(), "DETERMINISTIC");
        let json = serde_json::to_string(&RoutingType::Deterministic).unwrap();
        assert_eq!(json, "\"DETERMINISTIC\"");
    }

    #[test]
    fn verdict_renders_lowercase() {
        assert_eq!(Verdict::Fake.to_string(), "fake");
        assert_eq!(Verdict::Real.to_string(), "real");
        assert_eq!(serde_json::to_string(&Verdict::Real).unwrap(), "\"real\"");
    }
}
