use std::net::SocketAddr;
use std::sync::Arc;

use crate::{ServeArgs, site::Site, web};

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let (config, base_path) = super::load_config(args.config_file.as_deref()).await?;

    let site = Site::from_config(&config, &base_path)?;
    if !site.store().dir().is_dir() {
        tracing::warn!(
            dir = %site.store().dir().display(),
            "articles directory does not exist, the home page will report an error"
        );
    }
    if !site.images().images_dir().is_dir() {
        tracing::warn!(
            dir = %site.images().images_dir().display(),
            "images directory does not exist, image placeholders will render as errors"
        );
    }

    let app = web::router(Arc::new(site));

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    // Determine the URL to display
    let display_host = if args.bind == "0.0.0.0" {
        "localhost"
    } else {
        &args.bind
    };
    let url = format!("http://{}:{}", display_host, args.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%url, "serving {}", config.site.name);
    println!("\nServing site at {}", url);
    println!("Press Ctrl+C to stop\n");

    // Open browser if requested
    if args.open
        && let Err(e) = open::that(&url)
    {
        tracing::warn!(error = %e, "failed to open browser");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
