//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors are the domain crates' own error types.

mod app;
mod config;

use std::sync::Arc;
use std::time::Duration;

use auth::{MemoryUserRepository, PgUserRepository};
use books::{MemoryBookRepository, PgBookRepository};
use cache::{CacheBackend, MemoryStore, RedisStore};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::build_app;
use crate::config::ServerConfig;

/// How often expired entries are swept from the in-memory store
const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,books=info,cache=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Key-value backend shared by sessions and entity caches
    let kv = match &config.redis_url {
        Some(url) => CacheBackend::Redis(RedisStore::connect(url).await?),
        None => {
            tracing::warn!("REDIS_URL not set, sessions and cache are process-local");
            CacheBackend::Memory(MemoryStore::new())
        }
    };
    let kv = Arc::new(kv);
    tracing::info!(backend = kv.name(), "Key-value store ready");

    if kv.as_memory().is_some() {
        tokio::spawn(purge_expired(kv.clone()));
    }

    let app = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await?;
            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;
            tracing::info!("Migrations completed");

            build_app(
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgBookRepository::new(pool)),
                kv,
                &config,
            )?
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory repositories");
            build_app(
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryBookRepository::new()),
                kv,
                &config,
            )?
        }
    };

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Sweep expired entries from the in-memory store. Lookups already ignore
/// them; this only bounds memory.
async fn purge_expired(kv: Arc<CacheBackend>) {
    let mut interval = tokio::time::interval(PURGE_INTERVAL);

    loop {
        interval.tick().await;

        if let Some(store) = kv.as_memory() {
            let purged = store.purge_expired().await;
            if purged > 0 {
                tracing::debug!(entries_purged = purged, "Expired cache entries purged");
            }
        }
    }
}
