//! Subcommand handlers.

use std::path::{Path, PathBuf};

use crate::camera::{
    calculate_aspect_ratio, maintain_aspect_ratio, CameraError, CameraManager, CameraSettings,
    Dimensions, CAPTURE_FAILED_MESSAGE,
};
use crate::config::{default_path, Config, ConfigError};
use crate::platform::raster::{decode_data_url, RasterSurfaceFactory};
use crate::platform::still::StillImagePlatform;
use crate::platform::SurfaceError;

use super::args::ConfigAction;

/// Errors reported by subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Camera error ({0})")]
    Camera(CameraError),
    #[error("Could not decode captured image: {0}")]
    Surface(#[from] SurfaceError),
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Config file already exists: {}\nUse 'label-scanner config show' to view current settings.", .0.display())]
    ConfigExists(PathBuf),
}

type ImageCamera = CameraManager<StillImagePlatform, RasterSurfaceFactory>;

fn last_error(camera: &ImageCamera) -> CommandError {
    CommandError::Camera(
        camera
            .state()
            .error
            .unwrap_or_else(|| CameraError::unknown(CAPTURE_FAILED_MESSAGE)),
    )
}

/// Acquire the image-backed camera, capture one photo and emit it.
pub async fn capture(
    image: &Path,
    output: Option<&Path>,
    device: Option<&str>,
    settings: CameraSettings,
) -> Result<(), CommandError> {
    let platform = StillImagePlatform::from_path(image);
    let mut camera = CameraManager::builder(platform, RasterSurfaceFactory::default())
        .settings(settings)
        .build();

    let acquired = match device {
        Some(id) => camera.switch_camera(id).await,
        None => {
            let granted = camera.request_camera_permission().await;
            if granted {
                camera.select_default_camera().await;
            }
            granted
        }
    };
    if !acquired {
        return Err(last_error(&camera));
    }

    let Some(video) = camera.state().stream else {
        return Err(last_error(&camera));
    };
    let data_url = camera
        .capture_photo(&video)
        .ok_or_else(|| last_error(&camera))?;
    camera.cleanup();

    match output {
        None => println!("{}", data_url),
        Some(path) => {
            let is_png = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
            let contents = if is_png {
                decode_data_url(&data_url)?.1
            } else {
                data_url.into_bytes()
            };
            std::fs::write(path, contents).map_err(|e| CommandError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
            log::info!("Wrote capture to {}", path.display());
        }
    }
    Ok(())
}

/// List cameras and print them to stdout.
pub async fn list_cameras(image: &Path) {
    let camera = CameraManager::new(
        StillImagePlatform::from_path(image),
        RasterSurfaceFactory::default(),
    );
    let devices = camera.available_cameras().await;
    if devices.is_empty() {
        println!("No cameras found.");
        println!();
        println!("Make sure the image file exists and is readable.");
    } else {
        println!("Available cameras:");
        for device in devices {
            println!("  {}", device);
        }
        println!();
        println!("Use --device <id> with capture to select a camera.");
    }
}

/// Letterbox fit of `video` inside `container`, as printed by `fit`.
pub fn fit(container: Dimensions, video: Dimensions) -> Dimensions {
    let ratio = calculate_aspect_ratio(video.width, video.height);
    maintain_aspect_ratio(container.width, container.height, ratio)
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    config_path: Option<&Path>,
) -> Result<(), CommandError> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&path))?;
            println!("Current configuration:");
            println!("{}", config.to_toml()?);
            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(CommandError::ConfigExists(path));
            }
            let write_err = |e| CommandError::Write {
                path: path.clone(),
                source: e,
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
            let contents = format!(
                "# label-scanner configuration\n\n{}",
                Config::default().to_toml()?
            );
            std::fs::write(&path, contents).map_err(write_err)?;
            println!("Created config file: {}", path.display());
        }
    }
    Ok(())
}
