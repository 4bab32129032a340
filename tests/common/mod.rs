//! Test doubles for the camera platform.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use label_scanner::camera::{DeviceKind, VideoConstraints};
use label_scanner::platform::{
    DeviceDescriptor, DrawingContext, Frame, MediaDevices, MediaStream, MediaTrack, PixelSize,
    PlatformError, SurfaceError, SurfaceFactory, VideoSource,
};

#[derive(Debug, Clone)]
pub struct MockTrack {
    stopped: Arc<AtomicBool>,
}

impl MockTrack {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl MediaTrack for MockTrack {
    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn is_live(&self) -> bool {
        !self.is_stopped()
    }
}

#[derive(Debug, Clone)]
pub struct MockStream {
    pub id: usize,
    tracks: Vec<MockTrack>,
}

impl MockStream {
    pub fn with_tracks(id: usize, count: usize) -> Self {
        Self {
            id,
            tracks: (0..count)
                .map(|_| MockTrack {
                    stopped: Arc::new(AtomicBool::new(false)),
                })
                .collect(),
        }
    }

    pub fn all_stopped(&self) -> bool {
        self.tracks.iter().all(MockTrack::is_stopped)
    }

    pub fn any_stopped(&self) -> bool {
        self.tracks.iter().any(MockTrack::is_stopped)
    }
}

impl MediaStream for MockStream {
    type Track = MockTrack;

    fn tracks(&self) -> Vec<MockTrack> {
        self.tracks.clone()
    }
}

#[derive(Debug)]
struct Shared {
    supported: bool,
    request_error: Option<PlatformError>,
    devices: Result<Vec<DeviceDescriptor>, PlatformError>,
    requests: Vec<VideoConstraints>,
    issued: Vec<MockStream>,
    enumerations: usize,
}

/// Media platform whose behavior tests script through a cloned handle.
#[derive(Debug, Clone)]
pub struct MockPlatform {
    shared: Arc<Mutex<Shared>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                supported: true,
                request_error: None,
                devices: Ok(Vec::new()),
                requests: Vec::new(),
                issued: Vec::new(),
                enumerations: 0,
            })),
        }
    }

    pub fn unsupported() -> Self {
        let platform = Self::new();
        platform.shared.lock().unwrap().supported = false;
        platform
    }

    pub fn fail_with(&self, error: PlatformError) {
        self.shared.lock().unwrap().request_error = Some(error);
    }

    pub fn grant(&self) {
        self.shared.lock().unwrap().request_error = None;
    }

    pub fn set_devices(&self, devices: Vec<DeviceDescriptor>) {
        self.shared.lock().unwrap().devices = Ok(devices);
    }

    pub fn fail_enumeration(&self, error: PlatformError) {
        self.shared.lock().unwrap().devices = Err(error);
    }

    pub fn requests(&self) -> Vec<VideoConstraints> {
        self.shared.lock().unwrap().requests.clone()
    }

    pub fn issued(&self) -> Vec<MockStream> {
        self.shared.lock().unwrap().issued.clone()
    }

    pub fn enumerations(&self) -> usize {
        self.shared.lock().unwrap().enumerations
    }
}

#[async_trait]
impl MediaDevices for MockPlatform {
    type Stream = MockStream;

    fn is_supported(&self) -> bool {
        self.shared.lock().unwrap().supported
    }

    async fn request_video_stream(
        &self,
        constraints: &VideoConstraints,
    ) -> Result<MockStream, PlatformError> {
        let mut shared = self.shared.lock().unwrap();
        shared.requests.push(constraints.clone());
        if let Some(err) = shared.request_error.clone() {
            return Err(err);
        }
        let stream = MockStream::with_tracks(shared.issued.len(), 2);
        shared.issued.push(stream.clone());
        Ok(stream)
    }

    async fn enumerate_devices(&self) -> Result<Vec<DeviceDescriptor>, PlatformError> {
        let mut shared = self.shared.lock().unwrap();
        shared.enumerations += 1;
        shared.devices.clone()
    }
}

pub fn video_device(id: &str, label: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        device_id: id.to_string(),
        kind: DeviceKind::VideoInput,
        label: label.to_string(),
        group_id: format!("group-{}", id),
    }
}

pub fn audio_device(id: &str, label: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        device_id: id.to_string(),
        kind: DeviceKind::AudioInput,
        label: label.to_string(),
        group_id: format!("group-{}", id),
    }
}

/// How a [`MockSurfaces`] context behaves.
#[derive(Debug, Clone)]
pub enum SurfaceBehavior {
    Works,
    NoContext,
    DrawFails(String),
    EncodeFails(String),
}

/// Surface factory recording the sizes it was asked for.
#[derive(Debug, Clone)]
pub struct MockSurfaces {
    behavior: SurfaceBehavior,
    created: Arc<Mutex<Vec<PixelSize>>>,
}

impl MockSurfaces {
    pub fn new(behavior: SurfaceBehavior) -> Self {
        Self {
            behavior,
            created: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn created(&self) -> Vec<PixelSize> {
        self.created.lock().unwrap().clone()
    }
}

pub struct MockContext {
    behavior: SurfaceBehavior,
    pub draws: Vec<(u32, u32, u32, u32)>,
}

impl SurfaceFactory for MockSurfaces {
    type Context = MockContext;

    fn create_context(&self, size: PixelSize) -> Option<MockContext> {
        self.created.lock().unwrap().push(size);
        match self.behavior {
            SurfaceBehavior::NoContext => None,
            _ => Some(MockContext {
                behavior: self.behavior.clone(),
                draws: Vec::new(),
            }),
        }
    }
}

impl DrawingContext for MockContext {
    fn draw_image(
        &mut self,
        _source: &dyn VideoSource,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), SurfaceError> {
        if let SurfaceBehavior::DrawFails(msg) = &self.behavior {
            return Err(SurfaceError::Draw(msg.clone()));
        }
        self.draws.push((x, y, width, height));
        Ok(())
    }

    fn to_data_url(&self, mime: &str, _quality: f32) -> Result<String, SurfaceError> {
        if let SurfaceBehavior::EncodeFails(msg) = &self.behavior {
            return Err(SurfaceError::Encode(msg.clone()));
        }
        Ok(format!("data:{};base64,bW9jay1pbWFnZS1kYXRh", mime))
    }
}

/// A video element reporting `reported` as its size and serving frames of
/// `frame` size.
pub struct FakeVideo {
    pub reported: PixelSize,
    pub frame: PixelSize,
}

impl FakeVideo {
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            reported: PixelSize::new(width, height),
            frame: PixelSize::new(width, height),
        }
    }
}

impl VideoSource for FakeVideo {
    fn video_size(&self) -> PixelSize {
        self.reported
    }

    fn current_frame(&self) -> Result<Frame, SurfaceError> {
        let pixels = self.frame.width as usize * self.frame.height as usize;
        Frame::new(vec![128; pixels * 3], self.frame.width, self.frame.height)
    }
}
