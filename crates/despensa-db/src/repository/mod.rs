//! SurrealDB repository implementations.

mod ingredient;
mod role;
mod snapshot;
mod user;

pub use ingredient::SurrealIngredientRepository;
pub use role::SurrealRoleRepository;
pub use snapshot::SurrealSnapshotRepository;
pub use user::{SurrealUserRepository, verify_password};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DbError;

/// Parse a stored UUID string.
pub(crate) fn parse_uuid(raw: &str, field: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}

/// Parse a stored fixed-point decimal string.
pub(crate) fn parse_decimal(raw: &str, field: &str) -> Result<Decimal, DbError> {
    raw.parse::<Decimal>()
        .map_err(|e| DbError::Decode(format!("invalid {field} decimal: {e}")))
}
