//! Integration tests for role resolution against in-memory SurrealDB.

use despensa_access::role::{RoleRef, resolve};
use despensa_core::DespensaError;
use despensa_core::models::role::CreateRole;
use despensa_core::repository::RoleRepository;
use despensa_db::repository::SurrealRoleRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;

/// Spin up in-memory DB, run migrations, create one role.
async fn setup() -> (SurrealRoleRepository<Db>, despensa_core::models::role::Role) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    despensa_db::run_migrations(&db).await.unwrap();

    let repo = SurrealRoleRepository::new(db);
    let role = repo
        .create(CreateRole {
            name: "gerente".into(),
            display_name: "Gerente".into(),
            permissions: vec!["view_dashboard".into(), "view_reports".into()],
            system: false,
            color: String::new(),
            icon: String::new(),
        })
        .await
        .unwrap();

    (repo, role)
}

#[tokio::test]
async fn resolves_a_bare_id_string() {
    let (repo, role) = setup().await;

    let resolved = resolve(
        &repo,
        RoleRef::Unresolved {
            raw_id: role.id.to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(resolved.name, "gerente");
    assert!(resolved.can("view_dashboard"));
    assert!(!resolved.can("manage_users"));
}

#[tokio::test]
async fn resolves_a_legacy_name_literal() {
    let (repo, _) = setup().await;

    let resolved = resolve(
        &repo,
        RoleRef::Unresolved {
            raw_id: "gerente".into(),
        },
    )
    .await
    .unwrap();

    assert!(resolved.can_all(&["view_dashboard", "view_reports"]));
}

#[tokio::test]
async fn already_resolved_refs_pass_through() {
    let (repo, role) = setup().await;

    let resolved = resolve(&repo, RoleRef::from(&role)).await.unwrap();
    assert_eq!(resolved.name, role.name);
    assert_eq!(resolved.permissions.len(), 2);
}

#[tokio::test]
async fn unknown_reference_is_not_found() {
    let (repo, _) = setup().await;

    let result = resolve(
        &repo,
        RoleRef::Unresolved {
            raw_id: "mesero".into(),
        },
    )
    .await;

    assert!(matches!(result, Err(DespensaError::NotFound { .. })));
}
