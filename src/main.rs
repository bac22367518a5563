//! Binary entrypoint: boots the Axum HTTP server, wiring routes, shared
//! state, and middleware.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clipscore::api::{create_router, AppState};
use clipscore::metrics::Metrics;
use clipscore::provider::youtube::YouTubeProvider;
use clipscore::provider::VideoProvider;

const HISTORY_CAP: usize = 2000;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clipscore=info,scoring=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. Enables
    // YOUTUBE_API_KEY and BIND_ADDR without exporting them by hand.
    let _ = dotenvy::dotenv();
    init_tracing();

    // Force profile validation before accepting traffic; invalid embedded
    // config must fail startup, not the first request.
    let _ = clipscore::registry();

    let provider: Option<Arc<dyn VideoProvider + Send + Sync>> =
        match std::env::var("YOUTUBE_API_KEY") {
            Ok(key) if !key.is_empty() => Some(Arc::new(YouTubeProvider::from_api_key(key))),
            _ => {
                tracing::warn!("YOUTUBE_API_KEY not set; /analyze/url disabled");
                None
            }
        };

    let metrics = Metrics::init(HISTORY_CAP);
    let router = create_router(AppState::new(provider)).merge(metrics.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "clipscore listening");
    axum::serve(listener, router).await?;
    Ok(())
}
