//! Role-name gating for protected resources.
//!
//! A coarser check than the permission evaluator: each protected
//! resource (a route, a capture area) carries a fixed allow-list of
//! role names. The administrative role passes every gate regardless of
//! the allow-list contents — that bypass is a deliberate rule and must
//! stay an explicit branch, never fall out of list contents.

use despensa_core::models::area::Area;
use tracing::debug;

pub use despensa_core::models::role::ADMIN_ROLE;

/// Whether a role name passes a gate with the given allow-list.
pub fn allows(role_name: &str, allow_list: &[&str]) -> bool {
    if role_name == ADMIN_ROLE {
        debug!(role = role_name, "administrative role bypasses gate");
        return true;
    }
    allow_list.contains(&role_name)
}

/// The fixed allow-list for a capture area.
pub fn area_allow_list(area: Area) -> &'static [&'static str] {
    match area {
        Area::Almacen => &["gerente", "capturista"],
        Area::Cocina => &["gerente", "cocinero"],
        Area::Ensalada => &["gerente", "cocinero"],
        Area::Isla => &["gerente", "capturista"],
    }
}

/// Whether a role name may capture stock in the given area.
pub fn area_gate(role_name: &str, area: Area) -> bool {
    allows(role_name, area_allow_list(area))
}
