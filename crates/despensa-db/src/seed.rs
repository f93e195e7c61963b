//! Idempotent bootstrap data.
//!
//! The application must always have a recoverable administrative
//! account. Instead of special-casing an identity at login time, the
//! seed guarantees at startup that the system roles and one bootstrap
//! administrative user exist with a durable role reference. Re-running
//! the seed never duplicates or overwrites existing records.

use despensa_core::error::{DespensaError, DespensaResult};
use despensa_core::models::permission::{all_permissions, perms};
use despensa_core::models::role::{ADMIN_ROLE, CreateRole, Role};
use despensa_core::models::user::CreateUser;
use despensa_core::repository::{RoleRepository, UserRepository};
use surrealdb::{Connection, Surreal};
use tracing::info;

use crate::repository::{SurrealRoleRepository, SurrealUserRepository};

/// Bootstrap account settings.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub admin_name: String,
    pub admin_email: String,
    /// Bootstrap credential — meant to be rotated after first login.
    pub admin_password: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_name: "Administrador".into(),
            admin_email: "admin@despensa.local".into(),
            admin_password: "cambiame".into(),
        }
    }
}

/// Create a role unless one with the same name already exists.
async fn ensure_role<R: RoleRepository>(repo: &R, input: CreateRole) -> DespensaResult<Role> {
    match repo.get_by_name(&input.name).await {
        Ok(role) => Ok(role),
        Err(DespensaError::NotFound { .. }) => {
            info!(role = %input.name, "seeding role");
            repo.create(input).await
        }
        Err(e) => Err(e),
    }
}

fn default_roles() -> Vec<CreateRole> {
    vec![
        CreateRole {
            name: ADMIN_ROLE.into(),
            display_name: "Administrador".into(),
            permissions: all_permissions(),
            system: true,
            color: "#b91c1c".into(),
            icon: "shield".into(),
        },
        CreateRole {
            name: "gerente".into(),
            display_name: "Gerente".into(),
            permissions: vec![
                perms::VIEW_DASHBOARD.into(),
                perms::VIEW_INGREDIENTS.into(),
                perms::CAPTURE_ALMACEN.into(),
                perms::CAPTURE_COCINA.into(),
                perms::CAPTURE_ENSALADA.into(),
                perms::CAPTURE_ISLA.into(),
                perms::CREATE_SNAPSHOT.into(),
                perms::VIEW_SNAPSHOTS.into(),
                perms::COMPARE_SNAPSHOTS.into(),
                perms::VIEW_REPORTS.into(),
                perms::VIEW_NOTIFICATIONS.into(),
            ],
            system: false,
            color: "#1d4ed8".into(),
            icon: "clipboard".into(),
        },
        CreateRole {
            name: "capturista".into(),
            display_name: "Capturista".into(),
            permissions: vec![
                perms::VIEW_INGREDIENTS.into(),
                perms::CAPTURE_ALMACEN.into(),
                perms::CAPTURE_ISLA.into(),
            ],
            system: false,
            color: "#15803d".into(),
            icon: "pencil".into(),
        },
        CreateRole {
            name: "cocinero".into(),
            display_name: "Cocinero".into(),
            permissions: vec![
                perms::VIEW_INGREDIENTS.into(),
                perms::CAPTURE_COCINA.into(),
                perms::CAPTURE_ENSALADA.into(),
            ],
            system: false,
            color: "#a16207".into(),
            icon: "chef-hat".into(),
        },
    ]
}

/// Ensure system roles and the bootstrap administrative account exist.
pub async fn run_seed<C: Connection>(db: &Surreal<C>, config: &SeedConfig) -> DespensaResult<()> {
    let role_repo = SurrealRoleRepository::new(db.clone());
    let user_repo = SurrealUserRepository::new(db.clone());

    let mut admin_role_id = None;
    for input in default_roles() {
        let is_admin = input.name == ADMIN_ROLE;
        let role = ensure_role(&role_repo, input).await?;
        if is_admin {
            admin_role_id = Some(role.id);
        }
    }
    let admin_role_id = admin_role_id
        .ok_or_else(|| DespensaError::Internal("seed produced no administrative role".into()))?;

    match user_repo.get_by_email(&config.admin_email).await {
        Ok(_) => {}
        Err(DespensaError::NotFound { .. }) => {
            info!(email = %config.admin_email, "seeding bootstrap administrative account");
            user_repo
                .create(CreateUser {
                    name: config.admin_name.clone(),
                    email: config.admin_email.clone(),
                    password: config.admin_password.clone(),
                    role_id: admin_role_id,
                })
                .await?;
        }
        Err(e) => return Err(e),
    }

    Ok(())
}
