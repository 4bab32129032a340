//! Camera manager: permission, device selection and still capture.

use log::{debug, info, warn};

use crate::platform::{
    DrawingContext, MediaDevices, MediaStream, MediaTrack, PixelSize, SurfaceError,
    SurfaceFactory, VideoSource,
};

use super::classify::{classify, unsupported};
use super::device::{pick_default, video_inputs};
use super::geometry::{self, Dimensions};
use super::types::{
    CameraDevice, CameraError, CameraSettings, CameraState, VideoConstraints, CAPTURE_MIME,
};

/// Recorded when capture is attempted without a granted stream.
pub const NOT_READY_MESSAGE: &str = "Camera not available or permission not granted";

/// Recorded when the surface factory yields no 2D context.
pub const NO_CONTEXT_MESSAGE: &str = "Canvas context not available";

/// Recorded when a capture step fails without a message of its own.
pub const CAPTURE_FAILED_MESSAGE: &str = "Photo capture failed";

/// Owns the camera state and drives the platform.
///
/// Every fallible operation records its failure in the state's `error` and
/// signals it inline (`false` / `None`); no platform error escapes. The
/// state is only readable as a snapshot through [`CameraManager::state`].
///
/// Operations take `&mut self`, so one manager can't be driven by two
/// callers at once.
pub struct CameraManager<P: MediaDevices, F: SurfaceFactory> {
    platform: P,
    surfaces: F,
    settings: CameraSettings,
    state: CameraState<P::Stream>,
}

impl<P: MediaDevices, F: SurfaceFactory> std::fmt::Debug for CameraManager<P, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraManager")
            .field("settings", &self.settings)
            .field("is_permission_granted", &self.state.is_permission_granted)
            .field("has_stream", &self.state.stream.is_some())
            .field("error", &self.state.error)
            .finish_non_exhaustive()
    }
}

impl<P: MediaDevices, F: SurfaceFactory> CameraManager<P, F> {
    /// Create a manager with default settings and fresh state.
    pub fn new(platform: P, surfaces: F) -> Self {
        Self::builder(platform, surfaces).build()
    }

    /// Start building a manager with non-default settings or seeded state.
    pub fn builder(platform: P, surfaces: F) -> CameraManagerBuilder<P, F> {
        CameraManagerBuilder {
            platform,
            surfaces,
            settings: CameraSettings::default(),
            state: CameraState::default(),
        }
    }

    /// Settings the manager was built with.
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CameraState<P::Stream> {
        self.state.clone()
    }

    /// Ask the platform for a stream from the configured (rear by default)
    /// camera.
    ///
    /// Returns `true` when a stream was acquired. On failure the classified
    /// error is recorded, permission is marked not granted and any
    /// previously held stream is left as it was.
    pub async fn request_camera_permission(&mut self) -> bool {
        let constraints = VideoConstraints::facing(self.settings.facing_mode);
        self.acquire(constraints).await
    }

    /// Acquire a stream pinned to `device_id`, replacing the current one.
    ///
    /// Same success and failure rules as [`request_camera_permission`];
    /// on success the device becomes the selected one.
    ///
    /// [`request_camera_permission`]: CameraManager::request_camera_permission
    pub async fn switch_camera(&mut self, device_id: &str) -> bool {
        let acquired = self.acquire(VideoConstraints::device(device_id)).await;
        if acquired {
            self.state.selected_device_id = Some(device_id.to_string());
        }
        acquired
    }

    async fn acquire(&mut self, constraints: VideoConstraints) -> bool {
        if !self.platform.is_supported() {
            self.fail_permission(unsupported());
            return false;
        }

        match self.platform.request_video_stream(&constraints).await {
            Ok(stream) => {
                if let Some(previous) = self.state.stream.replace(stream) {
                    stop_tracks(&previous);
                }
                self.state.is_permission_granted = true;
                self.state.has_camera = true;
                self.state.error = None;
                info!("Camera stream acquired ({:?})", constraints);
                true
            }
            Err(e) => {
                self.fail_permission(classify(&e));
                false
            }
        }
    }

    fn fail_permission(&mut self, error: CameraError) {
        warn!("Camera request failed: {}", error);
        self.state.is_permission_granted = false;
        self.state.error = Some(error);
    }

    /// List video input devices.
    ///
    /// Enumeration is best-effort: any failure yields an empty list and
    /// leaves `error` untouched.
    pub async fn available_cameras(&self) -> Vec<CameraDevice> {
        if !self.platform.is_supported() {
            debug!("Device enumeration skipped: media devices unsupported");
            return Vec::new();
        }
        match self.platform.enumerate_devices().await {
            Ok(devices) => video_inputs(devices),
            Err(e) => {
                debug!("Device enumeration failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Select the default camera and record it as `selected_device_id`.
    ///
    /// Prefers a device labelled back/rear/environment, then the first one.
    /// With no cameras, returns `None` and keeps the previous selection.
    pub async fn select_default_camera(&mut self) -> Option<String> {
        let cameras = self.available_cameras().await;
        let chosen = pick_default(&cameras)?;

        info!("Selected camera {}", chosen);
        self.state.selected_device_id = Some(chosen.device_id.clone());
        Some(chosen.device_id.clone())
    }

    /// See [`geometry::calculate_aspect_ratio`].
    pub fn calculate_aspect_ratio(width: f64, height: f64) -> f64 {
        geometry::calculate_aspect_ratio(width, height)
    }

    /// See [`geometry::maintain_aspect_ratio`].
    pub fn maintain_aspect_ratio(
        container_width: f64,
        container_height: f64,
        video_aspect_ratio: f64,
    ) -> Dimensions {
        geometry::maintain_aspect_ratio(container_width, container_height, video_aspect_ratio)
    }

    /// Letterbox size for the current video inside a container.
    pub fn presentation_size(&self, container_width: f64, container_height: f64) -> Dimensions {
        geometry::maintain_aspect_ratio(container_width, container_height, self.state.aspect_ratio)
    }

    /// Capture the current frame of `video` as a PNG data URI.
    ///
    /// Requires a granted stream. On success the recorded error is cleared
    /// and the frame's aspect ratio becomes the state's `aspect_ratio`.
    pub fn capture_photo(&mut self, video: &dyn VideoSource) -> Option<String> {
        match self.try_capture(video) {
            Ok((data_url, size)) => {
                self.state.error = None;
                self.state.aspect_ratio =
                    geometry::calculate_aspect_ratio(size.width as f64, size.height as f64);
                Some(data_url)
            }
            Err(e) => {
                warn!("Photo capture failed: {}", e);
                self.state.error = Some(e);
                None
            }
        }
    }

    fn try_capture(&self, video: &dyn VideoSource) -> Result<(String, PixelSize), CameraError> {
        if !self.state.is_ready() {
            return Err(CameraError::unknown(NOT_READY_MESSAGE));
        }

        let size = surface_size(video.video_size(), self.settings.fallback_size);
        let mut context = self
            .surfaces
            .create_context(size)
            .ok_or_else(|| CameraError::unknown(NO_CONTEXT_MESSAGE))?;

        debug!("Capturing {}x{} frame", size.width, size.height);
        context
            .draw_image(video, 0, 0, size.width, size.height)
            .map_err(capture_failure)?;
        let data_url = context
            .to_data_url(CAPTURE_MIME, self.settings.image_quality)
            .map_err(capture_failure)?;

        Ok((data_url, size))
    }

    /// Stop every track of the held stream and drop it. Safe to repeat.
    pub fn cleanup(&mut self) {
        if let Some(stream) = self.state.stream.take() {
            stop_tracks(&stream);
            info!("Camera stream released");
        }
    }
}

impl<P: MediaDevices, F: SurfaceFactory> Drop for CameraManager<P, F> {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Builder for [`CameraManager`].
///
/// Seeding a stream is meant for test doubles and for handing an already
/// acquired stream to a new manager; it marks permission as granted.
pub struct CameraManagerBuilder<P: MediaDevices, F: SurfaceFactory> {
    platform: P,
    surfaces: F,
    settings: CameraSettings,
    state: CameraState<P::Stream>,
}

impl<P: MediaDevices, F: SurfaceFactory> CameraManagerBuilder<P, F> {
    /// Replace the default settings.
    pub fn settings(mut self, settings: CameraSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Seed an already acquired stream.
    pub fn stream(mut self, stream: P::Stream) -> Self {
        self.state.stream = Some(stream);
        self.state.is_permission_granted = true;
        self.state.has_camera = true;
        self
    }

    /// Seed the selected device id.
    pub fn selected_device(mut self, device_id: impl Into<String>) -> Self {
        self.state.selected_device_id = Some(device_id.into());
        self
    }

    /// Seed the video aspect ratio.
    pub fn aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.state.aspect_ratio = aspect_ratio;
        self
    }

    /// Seed a recorded error.
    pub fn error(mut self, error: CameraError) -> Self {
        self.state.error = Some(error);
        self
    }

    /// Finish building the manager.
    pub fn build(self) -> CameraManager<P, F> {
        CameraManager {
            platform: self.platform,
            surfaces: self.surfaces,
            settings: self.settings,
            state: self.state,
        }
    }
}

fn stop_tracks<S: MediaStream>(stream: &S) {
    for track in stream.tracks() {
        track.stop();
    }
}

/// Video size with each zero dimension replaced by the fallback's.
fn surface_size(native: PixelSize, fallback: PixelSize) -> PixelSize {
    PixelSize {
        width: if native.width == 0 { fallback.width } else { native.width },
        height: if native.height == 0 { fallback.height } else { native.height },
    }
}

fn capture_failure(error: SurfaceError) -> CameraError {
    let message = error.message();
    if message.is_empty() {
        CameraError::unknown(CAPTURE_FAILED_MESSAGE)
    } else {
        CameraError::unknown(message)
    }
}
