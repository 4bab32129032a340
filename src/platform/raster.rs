//! Software drawing surface backed by an in-memory RGB buffer.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};

use super::{DrawingContext, PixelSize, SurfaceError, SurfaceFactory, VideoSource};

/// Creates [`RasterContext`]s.
///
/// `max_pixels` bounds the surface area; larger requests get no context,
/// the same way a browser refuses an oversized canvas.
#[derive(Debug, Clone, Copy)]
pub struct RasterSurfaceFactory {
    pub max_pixels: u64,
}

impl RasterSurfaceFactory {
    /// 16384 x 16384, the largest canvas area mainstream browsers allow.
    pub const DEFAULT_MAX_PIXELS: u64 = 16384 * 16384;
}

impl Default for RasterSurfaceFactory {
    fn default() -> Self {
        Self {
            max_pixels: Self::DEFAULT_MAX_PIXELS,
        }
    }
}

impl SurfaceFactory for RasterSurfaceFactory {
    type Context = RasterContext;

    fn create_context(&self, size: PixelSize) -> Option<RasterContext> {
        let pixels = size.width as u64 * size.height as u64;
        if size.is_empty() || pixels > self.max_pixels {
            return None;
        }
        Some(RasterContext {
            canvas: RgbImage::new(size.width, size.height),
        })
    }
}

/// A black RGB canvas that frames are drawn onto.
#[derive(Debug, Clone)]
pub struct RasterContext {
    canvas: RgbImage,
}

impl RasterContext {
    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }
}

impl DrawingContext for RasterContext {
    fn draw_image(
        &mut self,
        source: &dyn VideoSource,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), SurfaceError> {
        let frame = source.current_frame()?;
        let image = RgbImage::from_raw(frame.width, frame.height, frame.data)
            .ok_or_else(|| SurfaceError::Draw("Frame buffer does not match its size".to_string()))?;

        if width == 0 || height == 0 {
            return Ok(());
        }
        let scaled = if image.dimensions() == (width, height) {
            image
        } else {
            imageops::resize(&image, width, height, FilterType::Triangle)
        };
        imageops::replace(&mut self.canvas, &scaled, x as i64, y as i64);
        Ok(())
    }

    fn to_data_url(&self, mime: &str, _quality: f32) -> Result<String, SurfaceError> {
        // PNG is lossless; the quality hint only matters to lossy encoders.
        if mime != "image/png" {
            log::debug!("Unsupported encoding {}, falling back to image/png", mime);
        }
        encode_png_data_url(&self.canvas)
    }
}

/// Encode an RGB image as `data:image/png;base64,...`.
pub fn encode_png_data_url(image: &RgbImage) -> Result<String, SurfaceError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| SurfaceError::Encode(e.to_string()))?;
    Ok(format!(
        "data:image/png;base64,{}",
        STANDARD.encode(bytes.into_inner())
    ))
}

/// Split a base64 `data:` URI into its MIME type and decoded payload.
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>), SurfaceError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| SurfaceError::Encode("Not a data URI".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SurfaceError::Encode("Data URI has no payload".to_string()))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| SurfaceError::Encode("Data URI is not base64 encoded".to_string()))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| SurfaceError::Encode(e.to_string()))?;
    Ok((mime.to_string(), bytes))
}
