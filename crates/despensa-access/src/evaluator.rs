//! Permission evaluation — pure decisions over a granted set.
//!
//! No state, no side effects, no error conditions. Authorization
//! denial is a `false` return, never an error.

use std::collections::HashSet;

/// How a multi-permission request combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckMode {
    /// Every requested permission must be granted (the default).
    #[default]
    All,
    /// At least one requested permission must be granted.
    Any,
}

/// Decide whether a grant set satisfies a permission request.
///
/// An empty `requested` list is vacuously true under [`CheckMode::All`]
/// and false under [`CheckMode::Any`]. An empty grant set denies every
/// non-empty request under either mode (fail-closed).
pub fn has_permission<S: AsRef<str>>(
    granted: &HashSet<String>,
    requested: &[S],
    mode: CheckMode,
) -> bool {
    match mode {
        CheckMode::All => requested.iter().all(|p| granted.contains(p.as_ref())),
        CheckMode::Any => requested.iter().any(|p| granted.contains(p.as_ref())),
    }
}

/// Single-permission convenience.
pub fn has_one_permission(granted: &HashSet<String>, requested: &str) -> bool {
    granted.contains(requested)
}

/// `has_permission` with [`CheckMode::All`].
pub fn has_all_permissions<S: AsRef<str>>(granted: &HashSet<String>, requested: &[S]) -> bool {
    has_permission(granted, requested, CheckMode::All)
}

/// `has_permission` with [`CheckMode::Any`].
pub fn has_any_permission<S: AsRef<str>>(granted: &HashSet<String>, requested: &[S]) -> bool {
    has_permission(granted, requested, CheckMode::Any)
}
