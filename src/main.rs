//! Local Library server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use local_library::{
    build_router,
    config::{AppConfig, DatabaseConfig, StoreBackend},
    repository::{MemoryCatalogStore, PgCatalogStore, Repository},
    AppState,
};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("local_library={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect and migrate; on failure keep serving over a lazy pool
async fn connect_database(config: &DatabaseConfig) -> anyhow::Result<Pool<Postgres>> {
    let options = || {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
    };

    match options().connect(&config.url).await {
        Ok(pool) => {
            tracing::info!("Connected to database");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations completed");
            Ok(pool)
        }
        Err(e) => {
            tracing::error!("Database connection failed, serving degraded: {}", e);
            options()
                .connect_lazy(&config.url)
                .context("Invalid database URL")
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config);

    tracing::info!(
        "Starting Local Library v{} ({})",
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let repository: Repository = match config.store.backend {
        StoreBackend::Postgres => Arc::new(PgCatalogStore::new(
            connect_database(&config.database).await?,
        )),
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Arc::new(MemoryCatalogStore::new())
        }
    };

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );
    let rate_limit = config.server.rate_limit_per_minute.max(1);

    let state = AppState::new(config, repository)?;

    let governor = GovernorConfigBuilder::default()
        .per_millisecond(60_000 / u64::from(rate_limit))
        .burst_size(rate_limit)
        .finish()
        .context("Invalid rate limit configuration")?;
    let app = build_router(state).layer(GovernorLayer {
        config: Arc::new(governor),
    });

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
