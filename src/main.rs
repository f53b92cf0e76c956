use std::sync::Arc;

use dotenvy::dotenv;
use envconfig::Envconfig;
use medicine_reminder::{
    config::Config,
    db::{init_db, PoolSettings},
    server::{run_server, AppState, ServerConfig},
    store::PgMedicineStore,
};

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load environment variables from a .env file if present
    dotenv().ok();

    // Initialize the logger with "info" level unless RUST_LOG says otherwise
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting the medicine reminder API...");

    let config = Config::init_from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        e
    })?;

    let settings = PoolSettings {
        max_connections: config.db_max_connections,
        acquire_timeout: config.acquire_timeout(),
    };
    let pool = init_db(&config.connection_string(), settings)
        .await
        .map_err(|e| {
            log::error!("Database initialization failed: {}", e);
            e
        })?;

    let state = AppState::new(Arc::new(PgMedicineStore::new(pool.clone())));
    run_server(state, ServerConfig::from(&config)).await?;

    pool.close().await;
    log::info!("Shutting down gracefully");
    Ok(())
}
