//! Populates a PostgreSQL database with the fixture catalog.
//!
//! Usage: `populatedb [DATABASE_URL]`. Without an argument the URL comes from
//! the regular configuration (`CATALOG_DATABASE__CONNECTION_STRING` or
//! `DATABASE_URL`).

use shoe_catalog::config::AppConfig;
use shoe_catalog::seed;
use shoe_catalog::store::PostgresStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;
    let database_url = match std::env::args().nth(1) {
        Some(url) => url,
        None => config.database_url()?,
    };

    log::info!("Connecting to PostgreSQL...");
    let store = PostgresStore::new(&database_url, config.max_connections()).await?;
    store.migrate().await?;

    let summary = seed::load_seed_data(&store).await?;
    log::info!(
        "Inserted {} types, {} brands, {} shoes and {} shoe instances",
        summary.types,
        summary.brands,
        summary.shoes,
        summary.shoe_instances
    );

    store.close().await;
    Ok(())
}
