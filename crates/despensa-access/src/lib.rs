//! DESPENSA Access — permission evaluation, role resolution, and
//! role-name gating.

pub mod evaluator;
pub mod gate;
pub mod role;

pub use evaluator::{CheckMode, has_all_permissions, has_any_permission, has_permission};
pub use gate::{ADMIN_ROLE, allows, area_gate};
pub use role::{ResolvedRole, RoleRef, resolve};
