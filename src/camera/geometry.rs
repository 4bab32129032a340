//! Aspect-ratio geometry for presenting the live video.

use serde::{Deserialize, Serialize};

/// Aspect ratio assumed until a real video size is known (16:9).
pub const DEFAULT_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// A width/height pair in CSS-style (fractional) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `width / height`, falling back to the default ratio for zero height.
    pub fn aspect_ratio(&self) -> f64 {
        calculate_aspect_ratio(self.width, self.height)
    }
}

/// Calculate `width / height`.
///
/// Returns [`DEFAULT_ASPECT_RATIO`] when `height` is exactly zero instead of
/// producing an infinite or NaN ratio.
pub fn calculate_aspect_ratio(width: f64, height: f64) -> f64 {
    if height == 0.0 {
        return DEFAULT_ASPECT_RATIO;
    }
    width / height
}

/// Fit a video of `video_aspect_ratio` inside a container, preserving its
/// aspect ratio (letterbox / pillarbox).
///
/// A video relatively wider than the container takes the full container
/// width; otherwise it takes the full container height.
///
/// # Example
/// ```
/// use label_scanner::camera::maintain_aspect_ratio;
///
/// // 16:9 video in a 4:3 box is letterboxed
/// let fit = maintain_aspect_ratio(800.0, 600.0, 16.0 / 9.0);
/// assert_eq!(fit.width, 800.0);
/// assert!((fit.height - 450.0).abs() < 1e-9);
/// ```
pub fn maintain_aspect_ratio(
    container_width: f64,
    container_height: f64,
    video_aspect_ratio: f64,
) -> Dimensions {
    let container_aspect_ratio = container_width / container_height;

    if video_aspect_ratio > container_aspect_ratio {
        Dimensions {
            width: container_width,
            height: container_width / video_aspect_ratio,
        }
    } else {
        Dimensions {
            width: container_height * video_aspect_ratio,
            height: container_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio_basic() {
        assert!((calculate_aspect_ratio(1920.0, 1080.0) - 16.0 / 9.0).abs() < 1e-10);
        assert!((calculate_aspect_ratio(640.0, 480.0) - 4.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_aspect_ratio_zero_height_falls_back() {
        assert_eq!(calculate_aspect_ratio(1280.0, 0.0), DEFAULT_ASPECT_RATIO);
        assert_eq!(calculate_aspect_ratio(0.0, 0.0), DEFAULT_ASPECT_RATIO);
    }

    #[test]
    fn test_fit_wide_video_in_square() {
        let fit = maintain_aspect_ratio(500.0, 500.0, 2.0);
        assert_eq!(fit.width, 500.0);
        assert_eq!(fit.height, 250.0);
    }

    #[test]
    fn test_fit_tall_video_in_wide_container() {
        // 9:16 portrait stream in a 16:9 box is pillarboxed
        let fit = maintain_aspect_ratio(1600.0, 900.0, 9.0 / 16.0);
        assert_eq!(fit.height, 900.0);
        assert!((fit.width - 506.25).abs() < 1e-9);
    }

    #[test]
    fn test_fit_equal_ratio_fills_container() {
        let fit = maintain_aspect_ratio(640.0, 480.0, 4.0 / 3.0);
        assert!((fit.width - 640.0).abs() < 1e-9);
        assert_eq!(fit.height, 480.0);
    }

    #[test]
    fn test_dimensions_aspect_ratio() {
        assert_eq!(Dimensions::new(300.0, 0.0).aspect_ratio(), DEFAULT_ASPECT_RATIO);
        assert_eq!(Dimensions::new(300.0, 150.0).aspect_ratio(), 2.0);
    }
}
