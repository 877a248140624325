//! Path-based authorization
//!
//! Decides whether a role may access a path, given the configured set of
//! admin-only path prefixes.

use crate::auth::Role;

/// Authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Check whether `role` may access `path`.
///
/// Paths under a protected prefix require the admin role; every other path is
/// allowed regardless of role.
pub fn authorize(path: &str, role: Role, protected: &[String]) -> Access {
    let is_protected = protected.iter().any(|prefix| path.starts_with(prefix));
    if is_protected && !role.is_admin() {
        Access::Denied
    } else {
        Access::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn protected() -> Vec<String> {
        vec!["/admin".to_string()]
    }

    #[test]
    fn test_user_denied_on_protected_prefix() {
        assert_eq!(authorize("/admin", Role::User, &protected()), Access::Denied);
        assert_eq!(
            authorize("/admin/comments/1", Role::User, &protected()),
            Access::Denied
        );
    }

    #[test]
    fn test_admin_allowed_on_protected_prefix() {
        assert_eq!(
            authorize("/admin/users/1", Role::Admin, &protected()),
            Access::Allowed
        );
    }

    #[test]
    fn test_any_role_allowed_outside_protected_prefixes() {
        assert_eq!(authorize("/todos", Role::User, &protected()), Access::Allowed);
        assert_eq!(authorize("/todos", Role::Admin, &protected()), Access::Allowed);
    }

    #[test]
    fn test_no_protected_prefixes_allows_everything() {
        assert_eq!(authorize("/admin", Role::User, &[]), Access::Allowed);
    }
}
