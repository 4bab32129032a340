//! Camera acquisition and still capture.
//!
//! This module provides the camera state machine behind label scanning:
//! - Permission and stream acquisition via [`CameraManager`]
//! - Device selection via [`CameraManager::select_default_camera`]
//! - Presentation geometry via [`calculate_aspect_ratio`] and [`maintain_aspect_ratio`]
//! - Failure classification via [`classify`]

mod classify;
mod device;
mod geometry;
mod manager;
mod types;

pub use classify::{classify, ErrorName, UNSTRUCTURED_MESSAGE, UNSUPPORTED_MESSAGE};
pub use device::{is_rear_facing, pick_default, video_inputs, REAR_LABEL_HINTS};
pub use geometry::{calculate_aspect_ratio, maintain_aspect_ratio, Dimensions, DEFAULT_ASPECT_RATIO};
pub use manager::{
    CameraManager, CameraManagerBuilder, CAPTURE_FAILED_MESSAGE, NOT_READY_MESSAGE,
    NO_CONTEXT_MESSAGE,
};
pub use types::{
    CameraDevice, CameraError, CameraErrorKind, CameraSettings, CameraState, DeviceKind,
    FacingMode, VideoConstraints, CAPTURE_MIME, DEFAULT_IMAGE_QUALITY, FALLBACK_CAPTURE_SIZE,
};
