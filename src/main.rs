use clap::Parser;

use label_scanner::cli::{self, Args, Command};
use label_scanner::config::Config;

/// Install the logger. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.logging.level);

    let result = match args.command {
        Command::Capture {
            image,
            output,
            device,
        } => {
            cli::capture(
                &image,
                output.as_deref(),
                device.as_deref(),
                config.camera.settings(),
            )
            .await
        }
        Command::ListCameras { image } => {
            cli::list_cameras(&image).await;
            Ok(())
        }
        Command::Fit { container, video } => {
            let size = cli::fit(container, video);
            println!("{:.2}x{:.2}", size.width, size.height);
            Ok(())
        }
        Command::Config { action } => cli::handle_config_action(action, args.config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
