//! Hand-off from a captured photo to the text recognizer and health check.
//!
//! Recognition and evaluation live outside this crate; only the contracts
//! they are consumed through are defined here.

use async_trait::async_trait;

use crate::camera::{CameraError, CameraManager};
use crate::platform::{MediaDevices, SurfaceFactory, VideoSource};

/// Turns an encoded image (a `data:` URI) into recognized text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn recognize(&self, image_data_url: &str) -> Result<String, Self::Error>;
}

/// Judges recognized label text.
pub trait HealthEvaluator {
    type Verdict;

    fn evaluate(&self, text: &str) -> Self::Verdict;
}

/// Why a scan produced no text.
#[derive(Debug, thiserror::Error)]
pub enum ScanError<E: std::error::Error + 'static> {
    #[error("capture failed: {0}")]
    Capture(CameraError),
    #[error("text recognition failed: {0}")]
    Recognition(#[source] E),
}

/// Captures a photo and passes it on to a recognizer.
pub struct ScanSession<'a, P: MediaDevices, F: SurfaceFactory, R: TextRecognizer> {
    camera: &'a mut CameraManager<P, F>,
    recognizer: R,
}

impl<'a, P: MediaDevices, F: SurfaceFactory, R: TextRecognizer> ScanSession<'a, P, F, R> {
    pub fn new(camera: &'a mut CameraManager<P, F>, recognizer: R) -> Self {
        Self { camera, recognizer }
    }

    /// Capture the current frame and recognize its text.
    ///
    /// A capture failure is reported with the error the manager recorded.
    pub async fn scan(&mut self, video: &dyn VideoSource) -> Result<String, ScanError<R::Error>> {
        let Some(image) = self.camera.capture_photo(video) else {
            let error = self
                .camera
                .state()
                .error
                .unwrap_or_else(|| CameraError::unknown(crate::camera::CAPTURE_FAILED_MESSAGE));
            return Err(ScanError::Capture(error));
        };
        log::info!("Captured {} byte image, recognizing", image.len());
        self.recognizer
            .recognize(&image)
            .await
            .map_err(ScanError::Recognition)
    }

    /// Scan and evaluate in one step.
    pub async fn scan_and_evaluate<H: HealthEvaluator>(
        &mut self,
        video: &dyn VideoSource,
        evaluator: &H,
    ) -> Result<H::Verdict, ScanError<R::Error>> {
        let text = self.scan(video).await?;
        Ok(evaluator.evaluate(&text))
    }
}
