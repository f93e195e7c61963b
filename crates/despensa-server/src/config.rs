//! Environment configuration with logged defaults.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use despensa_db::{DbConfig, SeedConfig};
use tracing::{info, warn};

/// Load database and seed settings from the environment.
pub fn load() -> (DbConfig, SeedConfig) {
    let db = DbConfig {
        url: try_load("DESPENSA_DB_URL", "127.0.0.1:8000"),
        namespace: try_load("DESPENSA_DB_NAMESPACE", "despensa"),
        database: try_load("DESPENSA_DB_NAME", "main"),
        username: try_load("DESPENSA_DB_USER", "root"),
        password: try_load("DESPENSA_DB_PASSWORD", "root"),
    };

    let seed = SeedConfig {
        admin_name: try_load("DESPENSA_ADMIN_NAME", "Administrador"),
        admin_email: try_load("DESPENSA_ADMIN_EMAIL", "admin@despensa.local"),
        admin_password: try_load("DESPENSA_ADMIN_PASSWORD", "cambiame"),
    };

    (db, seed)
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
