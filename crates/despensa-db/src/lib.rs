//! DESPENSA Database — SurrealDB connection management, schema
//! migrations, repository implementations, and bootstrap seed.

mod connection;
mod error;
pub mod repository;
mod schema;
mod seed;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
pub use seed::{SeedConfig, run_seed};
