//! Encode pipeline binary.
//!
//! Submits the rendition ladder for one asset and waits for the encoding
//! to finish:
//!
//!   vodforge-encoder <asset-name>

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vodforge_client::EncodingClient;
use vodforge_encoder::{EncodePipeline, EncoderConfig};

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vodforge=info".parse().expect("static directive"));

    if use_json {
        tracing_subscriber::registry().with(fmt::layer().json()).with(env_filter).init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    let Some(asset) = std::env::args().nth(1) else {
        error!("usage: vodforge-encoder <asset-name>");
        std::process::exit(2);
    };

    info!("Starting vodforge-encoder");

    let client = match EncodingClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create encoding client: {}", e);
            std::process::exit(1);
        }
    };

    let config = match EncoderConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load encoder config: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = EncodePipeline::new(client, config);

    // Cancel the poll loop on ctrl-c
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        signal_cancel.cancel();
    });

    match pipeline.run(&asset, &cancel).await {
        Ok(submission) => {
            info!(encoding_id = %submission.encoding_id, "encoding completed successfully");
        }
        Err(e) => {
            error!("Encoding failed: {}", e);
            std::process::exit(1);
        }
    }
}
