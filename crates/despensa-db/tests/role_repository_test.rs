//! Integration tests for the Role repository using in-memory SurrealDB.

use despensa_core::DespensaError;
use despensa_core::models::role::{CreateRole, UpdateRole};
use despensa_core::repository::{Pagination, RoleRepository};
use despensa_db::repository::SurrealRoleRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    despensa_db::run_migrations(&db).await.unwrap();
    db
}

fn role(name: &str, permissions: &[&str]) -> CreateRole {
    CreateRole {
        name: name.into(),
        display_name: name.to_uppercase(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        system: false,
        color: "#333333".into(),
        icon: "tag".into(),
    }
}

#[tokio::test]
async fn create_and_get_role() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    let created = repo
        .create(role("gerente", &["view_dashboard", "view_reports"]))
        .await
        .unwrap();
    assert_eq!(created.name, "gerente");
    assert!(!created.system);

    let by_id = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(by_id.permissions, ["view_dashboard", "view_reports"]);

    let by_name = repo.get_by_name("gerente").await.unwrap();
    assert_eq!(by_name.id, created.id);
}

#[tokio::test]
async fn permissions_are_deduplicated() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    let created = repo
        .create(role(
            "capturista",
            &["view_ingredients", "capture_almacen", "view_ingredients"],
        ))
        .await
        .unwrap();
    assert_eq!(created.permissions, ["view_ingredients", "capture_almacen"]);

    let updated = repo
        .update(
            created.id,
            UpdateRole {
                permissions: Some(vec![
                    "capture_isla".into(),
                    "capture_isla".into(),
                    "view_ingredients".into(),
                ]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.permissions, ["capture_isla", "view_ingredients"]);
}

#[tokio::test]
async fn update_role_partial() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    let created = repo.create(role("cocinero", &["capture_cocina"])).await.unwrap();

    let updated = repo
        .update(
            created.id,
            UpdateRole {
                display_name: Some("Jefe de cocina".into()),
                color: Some("#a16207".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.display_name, "Jefe de cocina");
    assert_eq!(updated.color, "#a16207");
    assert_eq!(updated.permissions, ["capture_cocina"]); // unchanged
}

#[tokio::test]
async fn system_role_cannot_be_deleted() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    let mut input = role("admin", &["manage_users"]);
    input.system = true;
    let created = repo.create(input).await.unwrap();

    let result = repo.delete(created.id).await;
    assert!(matches!(result, Err(DespensaError::Validation { .. })));

    // Still there.
    assert!(repo.get_by_id(created.id).await.is_ok());
}

#[tokio::test]
async fn regular_role_can_be_deleted() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    let created = repo.create(role("temporal", &[])).await.unwrap();
    repo.delete(created.id).await.unwrap();

    let result = repo.get_by_id(created.id).await;
    assert!(result.is_err(), "deleted role should not be found");
}

#[tokio::test]
async fn duplicate_role_name_rejected() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    repo.create(role("unico", &[])).await.unwrap();
    let result = repo.create(role("unico", &[])).await;

    assert!(result.is_err(), "duplicate role name should be rejected");
}

#[tokio::test]
async fn list_roles_with_pagination() {
    let db = setup().await;
    let repo = SurrealRoleRepository::new(db);

    for i in 0..4 {
        repo.create(role(&format!("rol-{i}"), &[])).await.unwrap();
    }

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 3,
        })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 3);
    assert_eq!(page.total, 4);
}
