//! DESPENSA Server — application entry point.

mod config;

use despensa_db::DbManager;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("despensa=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting DESPENSA server...");

    let (db_config, seed_config) = config::load();

    let manager = match DbManager::connect(&db_config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = manager.init(&seed_config).await {
        tracing::error!(error = %e, "Failed to initialize the database");
        std::process::exit(1);
    }

    tracing::info!("Database migrated and seeded; DESPENSA is ready.");

    // TODO: Start REST API server
}
