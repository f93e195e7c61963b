//! Integration tests for the bootstrap seed.

use despensa_core::DespensaError;
use despensa_core::models::permission::all_permissions;
use despensa_core::models::role::ADMIN_ROLE;
use despensa_core::repository::{Pagination, RoleRepository, UserRepository};
use despensa_db::repository::{SurrealRoleRepository, SurrealUserRepository};
use despensa_db::{SeedConfig, run_seed};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    despensa_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn seed_creates_roles_and_bootstrap_admin() {
    let db = setup().await;
    run_seed(&db, &SeedConfig::default()).await.unwrap();

    let role_repo = SurrealRoleRepository::new(db.clone());
    let admin = role_repo.get_by_name(ADMIN_ROLE).await.unwrap();
    assert!(admin.system);
    // The administrative role carries the entire catalog.
    assert_eq!(admin.permissions, all_permissions());

    for name in ["gerente", "capturista", "cocinero"] {
        assert!(role_repo.get_by_name(name).await.is_ok(), "missing {name}");
    }

    let user_repo = SurrealUserRepository::new(db);
    let account = user_repo.get_by_email("admin@despensa.local").await.unwrap();
    assert_eq!(account.role_id, admin.id);
}

#[tokio::test]
async fn seed_is_idempotent() {
    let db = setup().await;
    let config = SeedConfig::default();

    run_seed(&db, &config).await.unwrap();
    let role_repo = SurrealRoleRepository::new(db.clone());
    let before = role_repo.get_by_name(ADMIN_ROLE).await.unwrap();

    run_seed(&db, &config).await.unwrap();

    let roles = role_repo.list(Pagination::default()).await.unwrap();
    assert_eq!(roles.total, 4);

    // Same admin role record, not a replacement.
    let after = role_repo.get_by_name(ADMIN_ROLE).await.unwrap();
    assert_eq!(after.id, before.id);

    let user_repo = SurrealUserRepository::new(db);
    let users = user_repo.list(Pagination::default()).await.unwrap();
    assert_eq!(users.total, 1);
}

#[tokio::test]
async fn seeded_admin_role_cannot_be_deleted() {
    let db = setup().await;
    run_seed(&db, &SeedConfig::default()).await.unwrap();

    let role_repo = SurrealRoleRepository::new(db);
    let admin = role_repo.get_by_name(ADMIN_ROLE).await.unwrap();

    let result = role_repo.delete(admin.id).await;
    assert!(matches!(result, Err(DespensaError::Validation { .. })));
}
