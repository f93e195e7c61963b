//! Role domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The distinguished administrative role name. Bypasses every
/// allow-list gate and is granted the full permission catalog by the
/// seed.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    /// Unique machine name, e.g. `admin`, `capturista`.
    pub name: String,
    /// Name shown in the UI.
    pub display_name: String,
    /// Granted permission strings. Deduplicated on write; order is
    /// irrelevant to evaluation.
    pub permissions: Vec<String>,
    /// System roles are created by the seed and cannot be deleted.
    pub system: bool,
    /// Display metadata only — no effect on evaluation.
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub display_name: String,
    pub permissions: Vec<String>,
    pub system: bool,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRole {
    pub display_name: Option<String>,
    pub permissions: Option<Vec<String>>,
    pub color: Option<String>,
    pub icon: Option<String>,
}
