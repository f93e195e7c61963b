//! Integration tests for the User repository using in-memory SurrealDB.

use despensa_core::models::role::CreateRole;
use despensa_core::models::user::{CreateUser, UpdateUser, UserStatus};
use despensa_core::repository::{RoleRepository, UserRepository};
use despensa_db::repository::{SurrealRoleRepository, SurrealUserRepository, verify_password};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Spin up in-memory DB, run migrations, create one role to hang
/// users off.
async fn setup() -> (Surreal<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    despensa_db::run_migrations(&db).await.unwrap();

    let role_repo = SurrealRoleRepository::new(db.clone());
    let role = role_repo
        .create(CreateRole {
            name: "gerente".into(),
            display_name: "Gerente".into(),
            permissions: vec!["view_dashboard".into()],
            system: false,
            color: String::new(),
            icon: String::new(),
        })
        .await
        .unwrap();

    (db, role.id)
}

#[tokio::test]
async fn create_hashes_password() {
    let (db, role_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(CreateUser {
            name: "Alicia".into(),
            email: "alicia@example.com".into(),
            password: "correct-horse-battery".into(),
            role_id,
        })
        .await
        .unwrap();

    assert_ne!(user.password_hash, "correct-horse-battery");
    assert!(verify_password("correct-horse-battery", &user.password_hash, None).unwrap());
    assert!(!verify_password("wrong", &user.password_hash, None).unwrap());
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.role_id, role_id);
}

#[tokio::test]
async fn get_by_email() {
    let (db, role_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let created = repo
        .create(CreateUser {
            name: "Beto".into(),
            email: "beto@example.com".into(),
            password: "pass1234".into(),
            role_id,
        })
        .await
        .unwrap();

    let fetched = repo.get_by_email("beto@example.com").await.unwrap();
    assert_eq!(fetched.id, created.id);

    let missing = repo.get_by_email("nadie@example.com").await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let (db, role_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    repo.create(CreateUser {
        name: "Uno".into(),
        email: "mismo@example.com".into(),
        password: "pass1234".into(),
        role_id,
    })
    .await
    .unwrap();

    let result = repo
        .create(CreateUser {
            name: "Dos".into(),
            email: "mismo@example.com".into(),
            password: "pass5678".into(),
            role_id,
        })
        .await;

    assert!(result.is_err(), "duplicate email should be rejected");
}

#[tokio::test]
async fn repoint_user_role() {
    let (db, role_id) = setup().await;
    let role_repo = SurrealRoleRepository::new(db.clone());
    let repo = SurrealUserRepository::new(db);

    let other_role = role_repo
        .create(CreateRole {
            name: "capturista".into(),
            display_name: "Capturista".into(),
            permissions: vec![],
            system: false,
            color: String::new(),
            icon: String::new(),
        })
        .await
        .unwrap();

    let user = repo
        .create(CreateUser {
            name: "Carla".into(),
            email: "carla@example.com".into(),
            password: "pass1234".into(),
            role_id,
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            user.id,
            UpdateUser {
                role_id: Some(other_role.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.role_id, other_role.id);
    assert_eq!(updated.email, "carla@example.com"); // unchanged
}

#[tokio::test]
async fn delete_is_soft() {
    let (db, role_id) = setup().await;
    let repo = SurrealUserRepository::new(db);

    let user = repo
        .create(CreateUser {
            name: "Dario".into(),
            email: "dario@example.com".into(),
            password: "pass1234".into(),
            role_id,
        })
        .await
        .unwrap();

    repo.delete(user.id).await.unwrap();

    // Record remains, but inactive.
    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.status, UserStatus::Inactive);
}
