use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use catalog_core::tracing::init_tracing;
use catalog_store::config::StoreConfig;
use catalog_store::router::build_router;
use catalog_store::state::AppState;
use catalog_store_migration::Migrator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = StoreConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to apply migrations")?;
        info!("store migrations applied");
    }

    let router = build_router(AppState { db });
    let http_addr = format!("0.0.0.0:{}", config.store_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("store service listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
