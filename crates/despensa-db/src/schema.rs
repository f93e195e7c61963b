//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints. Quantities and money are fixed-point decimals
//! stored as canonical strings and parsed with `rust_decimal` on read
//! — they are never touched as floats.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Ingredients (the live catalog with per-area stock)
-- =======================================================================
DEFINE TABLE ingredient SCHEMAFULL;
DEFINE FIELD name ON TABLE ingredient TYPE string;
DEFINE FIELD detail ON TABLE ingredient TYPE string DEFAULT '';
DEFINE FIELD sku ON TABLE ingredient TYPE string;
DEFINE FIELD unit ON TABLE ingredient TYPE string \
    ASSERT $value IN ['pieza', 'paquete', 'mililitro', 'litro', \
    'gramo', 'kilo'];
DEFINE FIELD unit_cost ON TABLE ingredient TYPE string;
DEFINE FIELD min_stock ON TABLE ingredient TYPE string DEFAULT '0';
DEFINE FIELD active ON TABLE ingredient TYPE bool DEFAULT true;
DEFINE FIELD stock ON TABLE ingredient TYPE object \
    DEFAULT { almacen: '0', cocina: '0', ensalada: '0', isla: '0' };
DEFINE FIELD stock.almacen ON TABLE ingredient TYPE string DEFAULT '0';
DEFINE FIELD stock.cocina ON TABLE ingredient TYPE string DEFAULT '0';
DEFINE FIELD stock.ensalada ON TABLE ingredient TYPE string DEFAULT '0';
DEFINE FIELD stock.isla ON TABLE ingredient TYPE string DEFAULT '0';
DEFINE FIELD created_at ON TABLE ingredient TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE ingredient TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_ingredient_sku ON TABLE ingredient \
    COLUMNS sku UNIQUE;

-- =======================================================================
-- Roles
-- =======================================================================
DEFINE TABLE role SCHEMAFULL;
DEFINE FIELD name ON TABLE role TYPE string;
DEFINE FIELD display_name ON TABLE role TYPE string;
DEFINE FIELD permissions ON TABLE role TYPE array;
DEFINE FIELD permissions.* ON TABLE role TYPE string;
DEFINE FIELD system ON TABLE role TYPE bool DEFAULT false;
DEFINE FIELD color ON TABLE role TYPE string DEFAULT '';
DEFINE FIELD icon ON TABLE role TYPE string DEFAULT '';
DEFINE FIELD created_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE role TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_role_name ON TABLE role COLUMNS name UNIQUE;

-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD role_id ON TABLE user TYPE string;
DEFINE FIELD status ON TABLE user TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Snapshots (immutable inventory closes)
-- =======================================================================
DEFINE TABLE snapshot SCHEMAFULL;
DEFINE FIELD name ON TABLE snapshot TYPE string;
DEFINE FIELD description ON TABLE snapshot TYPE string DEFAULT '';
DEFINE FIELD area ON TABLE snapshot TYPE string \
    ASSERT $value IN ['almacen', 'cocina', 'ensalada', 'isla', 'all'];
DEFINE FIELD items ON TABLE snapshot TYPE array;
DEFINE FIELD items.* ON TABLE snapshot TYPE object FLEXIBLE;
DEFINE FIELD summary ON TABLE snapshot TYPE object;
DEFINE FIELD summary.total_items ON TABLE snapshot TYPE int;
DEFINE FIELD summary.total_quantity ON TABLE snapshot TYPE string;
DEFINE FIELD summary.total_value ON TABLE snapshot TYPE string;
DEFINE FIELD created_at ON TABLE snapshot TYPE datetime \
    DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}
