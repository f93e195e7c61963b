//! The permission catalog.
//!
//! Permission strings are opaque tokens; the category grouping exists
//! for display purposes only and has no effect on evaluation.

/// Permission string constants.
pub mod perms {
    pub const VIEW_DASHBOARD: &str = "view_dashboard";

    pub const VIEW_INGREDIENTS: &str = "view_ingredients";
    pub const MANAGE_INGREDIENTS: &str = "manage_ingredients";

    pub const CAPTURE_ALMACEN: &str = "capture_almacen";
    pub const CAPTURE_COCINA: &str = "capture_cocina";
    pub const CAPTURE_ENSALADA: &str = "capture_ensalada";
    pub const CAPTURE_ISLA: &str = "capture_isla";

    pub const CREATE_SNAPSHOT: &str = "create_snapshot";
    pub const VIEW_SNAPSHOTS: &str = "view_snapshots";
    pub const EDIT_SNAPSHOT: &str = "edit_snapshot";
    pub const DELETE_SNAPSHOT: &str = "delete_snapshot";
    pub const COMPARE_SNAPSHOTS: &str = "compare_snapshots";

    pub const MANAGE_USERS: &str = "manage_users";
    pub const MANAGE_ROLES: &str = "manage_roles";

    pub const VIEW_REPORTS: &str = "view_reports";
    pub const VIEW_NOTIFICATIONS: &str = "view_notifications";
    pub const VIEW_BILLING: &str = "view_billing";
}

/// A named group of permissions, for rendering the role editor.
#[derive(Debug, Clone, Copy)]
pub struct PermissionCategory {
    pub name: &'static str,
    pub permissions: &'static [&'static str],
}

/// The full catalog, grouped by UI category.
pub const CATALOG: &[PermissionCategory] = &[
    PermissionCategory {
        name: "Panel",
        permissions: &[perms::VIEW_DASHBOARD],
    },
    PermissionCategory {
        name: "Inventario",
        permissions: &[perms::VIEW_INGREDIENTS, perms::MANAGE_INGREDIENTS],
    },
    PermissionCategory {
        name: "Capturas",
        permissions: &[
            perms::CAPTURE_ALMACEN,
            perms::CAPTURE_COCINA,
            perms::CAPTURE_ENSALADA,
            perms::CAPTURE_ISLA,
        ],
    },
    PermissionCategory {
        name: "Cierres",
        permissions: &[
            perms::CREATE_SNAPSHOT,
            perms::VIEW_SNAPSHOTS,
            perms::EDIT_SNAPSHOT,
            perms::DELETE_SNAPSHOT,
            perms::COMPARE_SNAPSHOTS,
        ],
    },
    PermissionCategory {
        name: "Administración",
        permissions: &[perms::MANAGE_USERS, perms::MANAGE_ROLES],
    },
    PermissionCategory {
        name: "Reportes",
        permissions: &[
            perms::VIEW_REPORTS,
            perms::VIEW_NOTIFICATIONS,
            perms::VIEW_BILLING,
        ],
    },
];

/// Every permission string in the catalog, flattened.
pub fn all_permissions() -> Vec<String> {
    CATALOG
        .iter()
        .flat_map(|category| category.permissions.iter().map(|p| p.to_string()))
        .collect()
}

/// Whether a string names a known permission.
pub fn is_known(permission: &str) -> bool {
    CATALOG
        .iter()
        .any(|category| category.permissions.contains(&permission))
}
