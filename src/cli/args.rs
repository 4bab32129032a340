//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::camera::Dimensions;

/// Parse and validate a size in WIDTHxHEIGHT format (e.g. 1280x720)
pub fn parse_size(s: &str) -> Result<Dimensions, String> {
    let (width, height) = s.split_once('x').ok_or_else(|| {
        format!(
            "Invalid size format '{}'. Use WIDTHxHEIGHT (e.g., 1280x720)",
            s
        )
    })?;
    let width: f64 = width
        .trim()
        .parse()
        .map_err(|_| format!("Invalid width '{}' in size", width))?;
    let height: f64 = height
        .trim()
        .parse()
        .map_err(|_| format!("Invalid height '{}' in size", height))?;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err("Size width and height must be greater than 0".to_string());
    }
    Ok(Dimensions::new(width, height))
}

/// Capture still photos of nutrition labels for text recognition
#[derive(Parser, Debug)]
#[command(name = "label-scanner")]
#[command(version, about = "Camera capture for nutrition-label scanning", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture a photo from an image file used as the camera
    Capture {
        /// Image standing in for the camera feed
        #[arg(long, short)]
        image: PathBuf,

        /// Write the result here instead of stdout (`.png` writes the decoded image)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Request this device instead of the default camera
        #[arg(long)]
        device: Option<String>,
    },
    /// List cameras the image-backed platform exposes
    ListCameras {
        #[arg(long, short)]
        image: PathBuf,
    },
    /// Letterbox a video size inside a container
    Fit {
        /// Container size, WIDTHxHEIGHT
        #[arg(value_parser = parse_size)]
        container: Dimensions,

        /// Video size, WIDTHxHEIGHT
        #[arg(value_parser = parse_size)]
        video: Dimensions,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
