use clap::Parser;

use icon_gallery::server::GalleryServer;
use icon_gallery::{cli, config};

/// Wait for the first Ctrl+C (graceful shutdown). A second Ctrl+C while the
/// server drains force-exits.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", e);
        return;
    }
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nicon-gallery: forced exit");
            std::process::exit(1);
        }
    });
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let args = cli::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|location| {
            match config::load_config(&location) {
                Ok(cfg) => {
                    tracing::debug!("Loaded config from {} ({})", location.path.display(), location.source);
                    Some(cfg)
                }
                Err(e) => {
                    tracing::warn!("Ignoring config file: {}", e);
                    None
                }
            }
        });

    let options = config::resolve(file_config, &args);

    tracing::info!("Scanning icon directories:");
    for path in &options.icons_path {
        tracing::info!("  {}", path.display());
    }

    let server = GalleryServer::global();
    let handle = match server.start(options).await {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Icon gallery: {}", handle.url());

    wait_for_shutdown().await;
    tracing::info!("Shutting down...");
    server.stop().await;
}
