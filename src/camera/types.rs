//! Camera types and data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::PixelSize;

use super::geometry::DEFAULT_ASPECT_RATIO;

/// Surface size used when the video reports no dimensions.
pub const FALLBACK_CAPTURE_SIZE: PixelSize = PixelSize::new(640, 480);

/// Encoder quality hint passed along with every capture.
pub const DEFAULT_IMAGE_QUALITY: f32 = 0.9;

/// MIME type of captured images.
pub const CAPTURE_MIME: &str = "image/png";

/// Kind of a system-enumerated media device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    VideoInput,
    AudioInput,
    AudioOutput,
}

/// Information about an available camera device.
///
/// A read-only projection of what the platform enumerated. The manager does
/// not own these; they live only as long as the caller keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDevice {
    pub device_id: String,
    pub kind: DeviceKind,
    /// Human-readable label (may be empty before permission is granted)
    pub label: String,
    pub group_id: String,
}

impl fmt::Display for CameraDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.is_empty() {
            write!(f, "[{}] (unlabelled)", self.device_id)
        } else {
            write!(f, "[{}] {}", self.device_id, self.label)
        }
    }
}

/// Camera orientation hint relative to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    /// Front / selfie camera
    User,
    /// Rear camera, the one pointed at a label
    #[default]
    Environment,
}

/// Constraints passed to the platform when requesting a video stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoConstraints {
    /// Pin the stream to one device
    pub device_id: Option<String>,
    pub facing_mode: Option<FacingMode>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub aspect_ratio: Option<f64>,
}

impl VideoConstraints {
    /// Constraints asking for a camera facing the given direction.
    pub fn facing(mode: FacingMode) -> Self {
        Self {
            facing_mode: Some(mode),
            ..Self::default()
        }
    }

    /// Constraints pinned to a specific device id.
    pub fn device(device_id: impl Into<String>) -> Self {
        Self {
            device_id: Some(device_id.into()),
            ..Self::default()
        }
    }
}

/// Settings for camera acquisition and capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Facing mode requested on permission
    pub facing_mode: FacingMode,
    /// Size of the capture surface when the video size is unknown
    pub fallback_size: PixelSize,
    /// Quality hint handed to the encoder
    pub image_quality: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            fallback_size: FALLBACK_CAPTURE_SIZE,
            image_quality: DEFAULT_IMAGE_QUALITY,
        }
    }
}

/// Which of the three failure classes a camera error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraErrorKind {
    /// Access was explicitly refused. Re-prompting may help.
    PermissionDenied,
    /// No usable device: absent, busy, unsupported or unclassifiable.
    DeviceNotFound,
    /// Failure inside the capture pipeline itself.
    Unknown,
}

impl CameraErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraErrorKind::PermissionDenied => "permission_denied",
            CameraErrorKind::DeviceNotFound => "device_not_found",
            CameraErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CameraErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Most recent camera failure, as recorded in [`CameraState::error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraError {
    #[serde(rename = "type")]
    pub kind: CameraErrorKind,
    pub message: String,
}

impl CameraError {
    pub fn new(kind: CameraErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(CameraErrorKind::PermissionDenied, message)
    }

    pub fn device_not_found(message: impl Into<String>) -> Self {
        Self::new(CameraErrorKind::DeviceNotFound, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(CameraErrorKind::Unknown, message)
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CameraError {}

/// State owned by a [`CameraManager`](super::CameraManager).
///
/// Callers only ever see clones of this via `state()`. `S` is the platform's
/// stream handle, which is a cheap shared handle, so a snapshot refers to
/// the same underlying stream without being able to replace it.
#[derive(Debug, Clone)]
pub struct CameraState<S> {
    pub is_permission_granted: bool,
    pub has_camera: bool,
    pub selected_device_id: Option<String>,
    pub stream: Option<S>,
    pub aspect_ratio: f64,
    pub error: Option<CameraError>,
}

impl<S> Default for CameraState<S> {
    fn default() -> Self {
        Self {
            is_permission_granted: false,
            has_camera: false,
            selected_device_id: None,
            stream: None,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            error: None,
        }
    }
}

impl<S> CameraState<S> {
    /// True when a stream is held and permission stands, i.e. capture may run.
    pub fn is_ready(&self) -> bool {
        self.stream.is_some() && self.is_permission_granted
    }
}
