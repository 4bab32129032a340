//! Mapping of platform failures onto the camera error taxonomy.

use crate::platform::PlatformError;

use super::types::CameraError;

/// Message recorded when the platform has no media subsystem.
pub const UNSUPPORTED_MESSAGE: &str = "Camera not supported";

/// Message recorded when the platform failed without any structure.
pub const UNSTRUCTURED_MESSAGE: &str = "Unknown camera error";

/// Known platform error names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorName {
    /// User or policy refused access (`NotAllowedError`, legacy `PermissionDeniedError`)
    NotAllowed,
    /// No device matches (`NotFoundError`, legacy `DevicesNotFoundError`)
    NotFound,
    /// Device present but busy or unreadable (`NotReadableError`, `TrackStartError`)
    NotReadable,
    /// Constraints can't be met (`OverconstrainedError`, `ConstraintNotSatisfiedError`)
    Overconstrained,
    /// Blocked by a security policy
    Security,
    /// Request aborted by the platform
    Abort,
    /// Anything not recognized
    Other(String),
}

impl ErrorName {
    pub fn parse(name: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => ErrorName::NotAllowed,
            "NotFoundError" | "DevicesNotFoundError" => ErrorName::NotFound,
            "NotReadableError" | "TrackStartError" => ErrorName::NotReadable,
            "OverconstrainedError" | "ConstraintNotSatisfiedError" => ErrorName::Overconstrained,
            "SecurityError" => ErrorName::Security,
            "AbortError" => ErrorName::Abort,
            other => ErrorName::Other(other.to_string()),
        }
    }
}

/// Classify a failed stream request.
///
/// Only an explicit refusal is reported as `permission_denied`; every other
/// named failure collapses to `device_not_found` with the platform's
/// message kept verbatim.
pub fn classify(error: &PlatformError) -> CameraError {
    match error {
        PlatformError::Named { name, message } => match ErrorName::parse(name) {
            ErrorName::NotAllowed => CameraError::permission_denied(message.clone()),
            ErrorName::NotFound
            | ErrorName::NotReadable
            | ErrorName::Overconstrained
            | ErrorName::Security
            | ErrorName::Abort
            | ErrorName::Other(_) => CameraError::device_not_found(message.clone()),
        },
        PlatformError::Unstructured(_) => CameraError::device_not_found(UNSTRUCTURED_MESSAGE),
    }
}

/// Error recorded when the platform can't request streams at all.
pub fn unsupported() -> CameraError {
    CameraError::device_not_found(UNSUPPORTED_MESSAGE)
}
