//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. The inventory engine and the
//! access layer depend only on these traits, never on the database
//! crate.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DespensaResult;
use crate::models::area::Area;
use crate::models::ingredient::{CreateIngredient, Ingredient, UpdateIngredient};
use crate::models::role::{CreateRole, Role, UpdateRole};
use crate::models::snapshot::{NewSnapshot, Snapshot, UpdateSnapshotMeta};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait IngredientRepository: Send + Sync {
    fn create(&self, input: CreateIngredient)
    -> impl Future<Output = DespensaResult<Ingredient>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DespensaResult<Ingredient>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateIngredient,
    ) -> impl Future<Output = DespensaResult<Ingredient>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DespensaResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DespensaResult<PaginatedResult<Ingredient>>> + Send;

    /// Read the entire catalog in one query.
    ///
    /// Snapshot creation relies on this being a single consistent read:
    /// concurrent stock edits must not interleave partial updates into
    /// the returned collection.
    fn list_all(&self) -> impl Future<Output = DespensaResult<Vec<Ingredient>>> + Send;

    /// Set one area's stock quantity (an area-capture operation).
    fn set_stock(
        &self,
        id: Uuid,
        area: Area,
        quantity: Decimal,
    ) -> impl Future<Output = DespensaResult<Ingredient>> + Send;
}

pub trait RoleRepository: Send + Sync {
    fn create(&self, input: CreateRole) -> impl Future<Output = DespensaResult<Role>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DespensaResult<Role>> + Send;
    fn get_by_name(&self, name: &str) -> impl Future<Output = DespensaResult<Role>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateRole,
    ) -> impl Future<Output = DespensaResult<Role>> + Send;
    /// Fails with a validation error for system roles.
    fn delete(&self, id: Uuid) -> impl Future<Output = DespensaResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DespensaResult<PaginatedResult<Role>>> + Send;
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = DespensaResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DespensaResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = DespensaResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = DespensaResult<User>> + Send;
    /// Soft-delete: sets status to Inactive.
    fn delete(&self, id: Uuid) -> impl Future<Output = DespensaResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DespensaResult<PaginatedResult<User>>> + Send;
}

pub trait SnapshotRepository: Send + Sync {
    /// Persist a fully computed snapshot in a single write.
    fn create(&self, input: NewSnapshot) -> impl Future<Output = DespensaResult<Snapshot>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DespensaResult<Snapshot>> + Send;
    /// Edits name/description only — items and summary are immutable.
    fn update_meta(
        &self,
        id: Uuid,
        input: UpdateSnapshotMeta,
    ) -> impl Future<Output = DespensaResult<Snapshot>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DespensaResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DespensaResult<PaginatedResult<Snapshot>>> + Send;
}
