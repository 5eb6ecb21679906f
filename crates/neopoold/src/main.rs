use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use neopoold::Config;
use neopoold::Engine;
use neopoold::api;

/// Bridge a Sugar Valley NeoPool controller (Tasmota MQTT) into a typed
/// entity model with an HTTP state API.
#[derive(Parser)]
#[command(name = "neopoold", version)]
struct Args {
    /// Path to the configuration file
    #[arg(default_value = "neopoold.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = Config::from_file(&args.config)?;

    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from(config.logging.level))
        .init();

    tracing::info!("neopoold starting");
    tracing::info!("Loaded config from: {}", args.config.display());

    let mut engine = Engine::new();
    engine.register_integrations_from_config(&config)?;
    let engine = Arc::new(engine);

    // Engine event loop
    let engine_task = {
        let engine = engine.clone();
        tokio::spawn(async move {
            if let Err(e) = engine.run().await {
                tracing::error!("Engine exited with error: {}", e);
            }
        })
    };

    // HTTP API
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let api_task = {
        let engine = engine.clone();
        let listen = config.api.listen.clone();
        let port = config.api.port;
        tokio::spawn(async move {
            if let Err(e) = api::serve(listen, port, engine, shutdown_rx).await {
                tracing::error!("HTTP API server error: {}", e);
            }
        })
    };

    tracing::info!("neopoold running, press Ctrl+C to exit");

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }

    let _ = shutdown_tx.send(());
    let _ = api_task.await;
    engine_task.abort();

    tracing::info!("neopoold shutdown complete");
    Ok(())
}
