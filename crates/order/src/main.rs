use anyhow::{Context, Result};
use order::{config::myconfig::Config, handler::AppRouter, state::AppState};
use shared::{
    config::{ConnectionManager, RedisPoolManager},
    utils::{Telemetry, init_logger},
};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let (config, state, telemetry) = setup().await.context("Failed to setup application")?;

    let serve_result = AppRouter::serve(config.port, state).await;

    if let Err(e) = &serve_result {
        error!("HTTP server failed: {e}");
    }

    shutdown(telemetry).await;

    serve_result
}

async fn setup() -> Result<(Config, Arc<AppState>, Telemetry)> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new(config.app_name.clone(), config.otel_endpoint.clone());
    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize log exporter")?;
    telemetry
        .init_meter()
        .context("Failed to initialize meter provider")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize tracer provider")?;

    init_logger(
        logger_provider,
        "order-service",
        config.is_dev,
        config.enable_file_log,
    );

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.db_min_conn,
        config.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("failed to migration database")?;
    }

    let redis_pool =
        RedisPoolManager::new_pool(&config.redis).context("Failed to create Redis pool")?;
    RedisPoolManager::ping(&redis_pool)
        .await
        .context("Failed to ping Redis server")?;

    let state = Arc::new(
        AppState::new(db_pool, redis_pool, &config).context("Failed to create AppState")?,
    );

    info!("✅ Application setup completed successfully.");
    Ok((config, state, telemetry))
}

async fn shutdown(telemetry: Telemetry) {
    info!("🛑 Shutting down order item service...");

    if let Err(e) = telemetry.shutdown().await {
        error!("Failed to shutdown telemetry: {e}");
    }

    info!("✅ Order item service shutdown complete.");
}

pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;

    Ok(())
}
