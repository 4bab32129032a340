//! Platform seam consumed by the camera manager.
//!
//! The manager never talks to hardware directly. Media devices, streams,
//! video sources and drawing surfaces are reached through the traits below:
//! - [`MediaDevices`] for stream acquisition and device enumeration
//! - [`VideoSource`] for the live frame being captured
//! - [`SurfaceFactory`] / [`DrawingContext`] for rendering and encoding
//!
//! [`raster`] provides an in-process drawing surface and [`still`] a
//! media-device platform backed by a single image.

pub mod raster;
pub mod still;

use async_trait::async_trait;

use crate::camera::{DeviceKind, VideoConstraints};

/// Failure reported by the media-device platform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// Structured failure carrying a platform error name
    /// (e.g. `NotAllowedError`) and a human-readable message.
    #[error("{name}: {message}")]
    Named { name: String, message: String },
    /// A failure that carried no structure at all, only a raw value.
    #[error("unstructured platform failure: {0}")]
    Unstructured(String),
}

impl PlatformError {
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        PlatformError::Named {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Failure while rendering or encoding a captured frame.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("{0}")]
    Frame(String),
    #[error("{0}")]
    Draw(String),
    #[error("{0}")]
    Encode(String),
}

impl SurfaceError {
    /// The bare message, without any kind prefix.
    pub fn message(&self) -> &str {
        match self {
            SurfaceError::Frame(msg) | SurfaceError::Draw(msg) | SurfaceError::Encode(msg) => msg,
        }
    }
}

/// A device as enumerated by the platform, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub device_id: String,
    pub kind: DeviceKind,
    pub label: String,
    pub group_id: String,
}

/// Pixel dimensions of a video source or drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero (size not known yet).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A raw RGB frame (3 bytes per pixel, row-major).
#[derive(Debug, Clone)]
pub struct Frame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Build a frame, checking that the buffer length matches the size.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(SurfaceError::Frame(format!(
                "Frame buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }
}

/// One track of a media stream. Stopping releases its hardware.
pub trait MediaTrack: Send + Sync {
    fn stop(&self);
    fn is_live(&self) -> bool;
}

/// Handle to an active stream. Clones refer to the same stream.
pub trait MediaStream: Clone + Send + Sync {
    type Track: MediaTrack;

    fn tracks(&self) -> Vec<Self::Track>;
}

/// The media-device subsystem.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    type Stream: MediaStream;

    /// Whether the platform exposes a media subsystem able to request
    /// streams at all.
    fn is_supported(&self) -> bool;

    /// Ask for a video stream. May suspend on a permission prompt.
    async fn request_video_stream(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<Self::Stream, PlatformError>;

    /// List every media device the platform knows about.
    async fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError>;
}

/// A live video element whose current frame can be read.
pub trait VideoSource {
    /// Native pixel size, or zero when not yet known.
    fn video_size(&self) -> PixelSize;

    fn current_frame(&self) -> Result<Frame, SurfaceError>;
}

/// A 2D drawing context attached to an offscreen surface.
pub trait DrawingContext {
    /// Draw the source's current frame scaled into the given rectangle.
    fn draw_image(
        &mut self,
        source: &dyn VideoSource,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), SurfaceError>;

    /// Encode the surface as a `data:` URI.
    fn to_data_url(&self, mime: &str, quality: f32) -> Result<String, SurfaceError>;
}

/// Creates drawing surfaces of a given size.
pub trait SurfaceFactory {
    type Context: DrawingContext;

    /// Returns `None` when no 2D context can be obtained.
    fn create_context(&self, size: PixelSize) -> Option<Self::Context>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_new_checks_length() {
        assert!(Frame::new(vec![0; 12], 2, 2).is_ok());
        let err = Frame::new(vec![0; 11], 2, 2).unwrap_err();
        assert!(err.message().contains("expected 12"));
    }

    #[test]
    fn test_pixel_size_is_empty() {
        assert!(PixelSize::new(0, 480).is_empty());
        assert!(PixelSize::new(640, 0).is_empty());
        assert!(!PixelSize::new(640, 480).is_empty());
    }

    #[test]
    fn test_platform_error_display() {
        let err = PlatformError::named("NotFoundError", "No camera device found");
        assert_eq!(format!("{}", err), "NotFoundError: No camera device found");
    }

    #[test]
    fn test_surface_error_message_has_no_prefix() {
        assert_eq!(SurfaceError::Encode("boom".to_string()).message(), "boom");
        assert_eq!(format!("{}", SurfaceError::Draw("bad".to_string())), "bad");
    }
}
