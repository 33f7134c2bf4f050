mod cache;
mod config;
mod db;
mod errors;
mod matching;
mod models;
mod records;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{MatchCache, NoopMatchCache, RedisMatchCache};
use crate::config::Config;
use crate::db::create_pool;
use crate::records::PgRecordSource;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Talent Match API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Match policy: threshold {} / cap {} / weights {:?}",
        config.match_policy.relevance_threshold,
        config.match_policy.result_cap,
        config.match_policy.weights
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize match cache (Redis when configured)
    let cache: Arc<dyn MatchCache> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            info!(
                "Redis match cache initialized (ttl {}s)",
                config.match_cache_ttl_secs
            );
            Arc::new(RedisMatchCache::new(client, config.match_cache_ttl_secs))
        }
        None => {
            info!("REDIS_URL not set; match cache disabled");
            Arc::new(NoopMatchCache)
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        records: Arc::new(PgRecordSource::new(db)),
        cache,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the portal domains

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
