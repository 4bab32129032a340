//! Media-device platform backed by a single still image.
//!
//! Stands in for a camera when the photo comes from a file upload: the
//! image is exposed as one video input whose stream always shows that
//! image. Load failures surface as named platform errors so they go
//! through the same classification as a real camera.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use image::RgbImage;

use crate::camera::{DeviceKind, VideoConstraints};

use super::{
    DeviceDescriptor, Frame, MediaDevices, MediaStream, MediaTrack, PixelSize, PlatformError,
    SurfaceError, VideoSource,
};

/// Device id of the single still-image camera.
pub const STILL_DEVICE_ID: &str = "still-image";

#[derive(Debug, Clone)]
enum StillSource {
    File(PathBuf),
    Image(Arc<RgbImage>),
}

/// A platform exposing one image as a camera.
#[derive(Debug, Clone)]
pub struct StillImagePlatform {
    source: StillSource,
    label: String,
}

impl StillImagePlatform {
    /// Platform reading the image from `path` when a stream is requested.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            source: StillSource::File(path),
            label,
        }
    }

    /// Platform serving an already decoded image.
    pub fn from_image(image: RgbImage, label: impl Into<String>) -> Self {
        Self {
            source: StillSource::Image(Arc::new(image)),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn is_present(&self) -> bool {
        match &self.source {
            StillSource::File(path) => path.is_file(),
            StillSource::Image(_) => true,
        }
    }

    async fn load(&self) -> Result<Arc<RgbImage>, PlatformError> {
        match &self.source {
            StillSource::Image(image) => Ok(Arc::clone(image)),
            StillSource::File(path) => load_file(path).await.map(Arc::new),
        }
    }
}

async fn load_file(path: &Path) -> Result<RgbImage, PlatformError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            PlatformError::named("NotFoundError", format!("No image at {}", path.display()))
        }
        ErrorKind::PermissionDenied => PlatformError::named(
            "NotAllowedError",
            format!("Permission denied reading {}", path.display()),
        ),
        _ => PlatformError::named("NotReadableError", e.to_string()),
    })?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| PlatformError::named("NotReadableError", e.to_string()))?;
    Ok(image.to_rgb8())
}

#[async_trait]
impl MediaDevices for StillImagePlatform {
    type Stream = StillStream;

    fn is_supported(&self) -> bool {
        true
    }

    async fn request_video_stream(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<StillStream, PlatformError> {
        if let Some(device_id) = &constraints.device_id {
            if device_id != STILL_DEVICE_ID {
                return Err(PlatformError::named(
                    "OverconstrainedError",
                    format!("No device with id {}", device_id),
                ));
            }
        }
        let image = self.load().await?;
        log::debug!(
            "Still image stream opened: {}x{}",
            image.width(),
            image.height()
        );
        Ok(StillStream::new(image))
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        if !self.is_present() {
            return Ok(Vec::new());
        }
        Ok(vec![DeviceDescriptor {
            device_id: STILL_DEVICE_ID.to_string(),
            kind: DeviceKind::VideoInput,
            label: self.label.clone(),
            group_id: STILL_DEVICE_ID.to_string(),
        }])
    }
}

/// The single video track of a [`StillStream`].
#[derive(Debug, Clone)]
pub struct StillTrack {
    live: Arc<AtomicBool>,
}

impl MediaTrack for StillTrack {
    fn stop(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Stream showing a still image. It is also the video source to capture
/// from, and goes blank once its track is stopped.
#[derive(Debug, Clone)]
pub struct StillStream {
    image: Arc<RgbImage>,
    track: StillTrack,
}

impl StillStream {
    fn new(image: Arc<RgbImage>) -> Self {
        Self {
            image,
            track: StillTrack {
                live: Arc::new(AtomicBool::new(true)),
            },
        }
    }
}

impl MediaStream for StillStream {
    type Track = StillTrack;

    fn tracks(&self) -> Vec<StillTrack> {
        vec![self.track.clone()]
    }
}

impl VideoSource for StillStream {
    fn video_size(&self) -> PixelSize {
        if !self.track.is_live() {
            return PixelSize::default();
        }
        PixelSize::new(self.image.width(), self.image.height())
    }

    fn current_frame(&self) -> Result<Frame, SurfaceError> {
        if !self.track.is_live() {
            return Err(SurfaceError::Frame("Video track has ended".to_string()));
        }
        Frame::new(
            self.image.as_raw().clone(),
            self.image.width(),
            self.image.height(),
        )
    }
}
