//! Role resolution.
//!
//! The application has historically stored a user's role in more than
//! one shape: a fully loaded role object, a bare id string, or a
//! legacy role-name literal. Everything funnels through [`resolve`],
//! which normalizes to [`ResolvedRole`] before any permission check —
//! call sites never branch on the representation.

use std::collections::HashSet;

use despensa_core::DespensaResult;
use despensa_core::models::role::Role;
use despensa_core::repository::RoleRepository;
use uuid::Uuid;

use crate::evaluator::{self, CheckMode};

/// A role normalized for evaluation: a name and its grant set.
#[derive(Debug, Clone)]
pub struct ResolvedRole {
    pub name: String,
    pub permissions: HashSet<String>,
}

impl ResolvedRole {
    pub fn from_role(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            permissions: role.permissions.iter().cloned().collect(),
        }
    }

    pub fn can(&self, permission: &str) -> bool {
        evaluator::has_one_permission(&self.permissions, permission)
    }

    pub fn can_all<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        evaluator::has_permission(&self.permissions, requested, CheckMode::All)
    }

    pub fn can_any<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        evaluator::has_permission(&self.permissions, requested, CheckMode::Any)
    }
}

/// A role reference as it may arrive from storage or a client.
#[derive(Debug, Clone)]
pub enum RoleRef {
    Resolved(ResolvedRole),
    /// A bare identifier: either a role id or a legacy role-name
    /// literal.
    Unresolved { raw_id: String },
}

impl From<&Role> for RoleRef {
    fn from(role: &Role) -> Self {
        RoleRef::Resolved(ResolvedRole::from_role(role))
    }
}

/// Normalize any [`RoleRef`] to a [`ResolvedRole`] through the role
/// store.
///
/// Unresolved refs are looked up by id when the raw value parses as a
/// UUID, otherwise by name (the legacy literal shape). An unknown
/// reference is a not-found error; the caller treats that as no
/// permissions at all.
pub async fn resolve<R: RoleRepository>(
    repo: &R,
    role_ref: RoleRef,
) -> DespensaResult<ResolvedRole> {
    match role_ref {
        RoleRef::Resolved(resolved) => Ok(resolved),
        RoleRef::Unresolved { raw_id } => {
            let role = match Uuid::parse_str(&raw_id) {
                Ok(id) => repo.get_by_id(id).await?,
                Err(_) => repo.get_by_name(&raw_id).await?,
            };
            Ok(ResolvedRole::from_role(&role))
        }
    }
}
