//! Navigation destinations, route guards, and the role-gated menu.
//!
//! Guards are pure: they map (login state, role, destination) to a
//! [`RouteDecision`] and never fail. An unauthorized attempt is a redirect,
//! not an error.

use crate::roles::Role;

/// Default landing page for an authenticated session.
pub const DASHBOARD_PATH: &str = "/dashboard";
/// Where unauthenticated navigation is redirected.
pub const LOGIN_PATH: &str = "/login";
/// Where role-mismatched navigation is redirected.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const USER_ONLY: &[Role] = &[Role::User];

/// A navigable destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Destination {
    pub id: &'static str,
    pub path: &'static str,
    /// `None` means visible to any authenticated session.
    pub allowed_roles: Option<&'static [Role]>,
}

/// Outcome of evaluating a guard for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// The destination may render.
    Render,
    /// No active session; go to the login page.
    ToLogin,
    /// Session present but the role may not see this destination.
    ToUnauthorized,
    /// Guest page requested while logged in; go to the dashboard.
    ToDashboard,
}

/// Destinations behind the authenticated guard.
pub const PROTECTED: &[Destination] = &[
    Destination {
        id: "dashboard",
        path: DASHBOARD_PATH,
        allowed_roles: None,
    },
    Destination {
        id: "transaction",
        path: "/transaction",
        allowed_roles: None,
    },
    Destination {
        id: "merchant",
        path: "/merchant",
        allowed_roles: Some(ADMIN_ONLY),
    },
    Destination {
        id: "virtual_accounts",
        path: "/virtual_accounts",
        allowed_roles: None,
    },
    Destination {
        id: "ledger",
        path: "/ledger",
        allowed_roles: Some(USER_ONLY),
    },
    Destination {
        id: "vanlog",
        path: "/vanlog",
        allowed_roles: None,
    },
    Destination {
        id: "support",
        path: "/support",
        allowed_roles: None,
    },
    Destination {
        id: "setting",
        path: "/setting",
        allowed_roles: Some(USER_ONLY),
    },
    Destination {
        id: "profile",
        path: "/profile",
        allowed_roles: None,
    },
    Destination {
        id: "developer",
        path: "/developer",
        allowed_roles: None,
    },
    Destination {
        id: "apimanager",
        path: "/apimanager",
        allowed_roles: Some(ADMIN_ONLY),
    },
    Destination {
        id: "service",
        path: "/service",
        allowed_roles: Some(ADMIN_ONLY),
    },
    Destination {
        id: "order",
        path: "/order",
        allowed_roles: Some(ADMIN_ONLY),
    },
];

/// Destinations reachable only while logged out.
pub const GUEST: &[Destination] = &[
    Destination {
        id: "login",
        path: LOGIN_PATH,
        allowed_roles: None,
    },
    Destination {
        id: "register",
        path: "/register",
        allowed_roles: None,
    },
];

/// Looks up a protected destination by id.
pub fn find(id: &str) -> Option<&'static Destination> {
    PROTECTED.iter().find(|d| d.id == id)
}

/// Gate for protected destinations.
///
/// Evaluated in order: the login check precedes the role check, so an
/// anonymous visitor is sent to login even for admin-only pages.
pub fn guard_protected(
    logged_in: bool,
    role: Option<Role>,
    dest: &Destination,
) -> RouteDecision {
    if !logged_in {
        return RouteDecision::ToLogin;
    }
    if let Some(allowed) = dest.allowed_roles
        && !role.is_some_and(|r| allowed.contains(&r))
    {
        return RouteDecision::ToUnauthorized;
    }
    RouteDecision::Render
}

/// Gate for guest-only destinations (login, register).
pub fn guard_guest(logged_in: bool) -> RouteDecision {
    if logged_in {
        RouteDecision::ToDashboard
    } else {
        RouteDecision::Render
    }
}

/// An entry in the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
    pub path: &'static str,
    pub roles: &'static [Role],
}

/// Navigation menu, in display order.
pub const MENU: &[MenuItem] = &[
    MenuItem {
        id: "dashboard",
        title: "Dashboard",
        path: DASHBOARD_PATH,
        roles: &[Role::Admin, Role::User],
    },
    MenuItem {
        id: "merchant",
        title: "Merchants",
        path: "/merchant",
        roles: ADMIN_ONLY,
    },
    MenuItem {
        id: "transaction",
        title: "Transactions",
        path: "/transaction",
        roles: &[Role::Admin, Role::User],
    },
    MenuItem {
        id: "virtual_accounts",
        title: "Virtual Accounts",
        path: "/virtual_accounts",
        roles: &[Role::Admin, Role::User],
    },
    MenuItem {
        id: "ledger",
        title: "Ledger",
        path: "/ledger",
        roles: USER_ONLY,
    },
    MenuItem {
        id: "vanlog",
        title: "Van Logs",
        path: "/vanlog",
        roles: &[Role::Admin, Role::User],
    },
    MenuItem {
        id: "support",
        title: "Support",
        path: "/support",
        roles: &[Role::Admin, Role::User],
    },
    MenuItem {
        id: "setting",
        title: "Settings",
        path: "/setting",
        roles: USER_ONLY,
    },
];

/// Returns the menu entries visible to `role`, in display order.
pub fn visible_menu(role: Role) -> Vec<&'static MenuItem> {
    MENU.iter().filter(|item| item.roles.contains(&role)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: no session redirects to login even for admin-only pages.
    #[test]
    fn test_no_session_goes_to_login_first() {
        let dest = find("merchant").unwrap();
        assert_eq!(
            guard_protected(false, None, dest),
            RouteDecision::ToLogin
        );
        // The role check never runs for anonymous visitors.
        assert_eq!(
            guard_protected(false, Some(Role::User), dest),
            RouteDecision::ToLogin
        );
    }

    /// Test: a user hitting an admin-only page is sent to unauthorized.
    #[test]
    fn test_role_mismatch_goes_to_unauthorized() {
        let dest = find("merchant").unwrap();
        assert_eq!(
            guard_protected(true, Some(Role::User), dest),
            RouteDecision::ToUnauthorized
        );
    }

    /// Test: an allowed role renders.
    #[test]
    fn test_allowed_role_renders() {
        let dest = find("dashboard").unwrap();
        assert_eq!(
            guard_protected(true, Some(Role::Admin), dest),
            RouteDecision::Render
        );
        assert_eq!(
            guard_protected(true, Some(Role::User), dest),
            RouteDecision::Render
        );

        let ledger = find("ledger").unwrap();
        assert_eq!(
            guard_protected(true, Some(Role::User), ledger),
            RouteDecision::Render
        );
    }

    /// Test: membership in a multi-role set renders.
    #[test]
    fn test_multi_role_destination() {
        let dest = Destination {
            id: "shared",
            path: "/shared",
            allowed_roles: Some(&[Role::Admin, Role::User]),
        };
        assert_eq!(
            guard_protected(true, Some(Role::Admin), &dest),
            RouteDecision::Render
        );
        assert_eq!(
            guard_protected(true, Some(Role::User), &dest),
            RouteDecision::Render
        );
    }

    /// Test: a marker without a readable role cannot pass a restricted gate.
    #[test]
    fn test_unknown_role_is_unauthorized() {
        let dest = find("service").unwrap();
        assert_eq!(
            guard_protected(true, None, dest),
            RouteDecision::ToUnauthorized
        );
        // Unrestricted destinations still render.
        let open = find("transaction").unwrap();
        assert_eq!(guard_protected(true, None, open), RouteDecision::Render);
    }

    /// Test: guest guard redirects logged-in sessions to the dashboard.
    #[test]
    fn test_guest_guard() {
        assert_eq!(guard_guest(true), RouteDecision::ToDashboard);
        assert_eq!(guard_guest(false), RouteDecision::Render);
    }

    /// Test: menu visibility follows roles.
    #[test]
    fn test_visible_menu() {
        let admin: Vec<_> = visible_menu(Role::Admin).iter().map(|m| m.id).collect();
        assert!(admin.contains(&"merchant"));
        assert!(!admin.contains(&"ledger"));

        let user: Vec<_> = visible_menu(Role::User).iter().map(|m| m.id).collect();
        assert!(user.contains(&"ledger"));
        assert!(user.contains(&"setting"));
        assert!(!user.contains(&"merchant"));
    }

    /// Test: destination ids are unique.
    #[test]
    fn test_destination_ids_unique() {
        let mut seen = std::collections::HashSet::new();
        for dest in PROTECTED.iter().chain(GUEST) {
            assert!(seen.insert(dest.id), "duplicate destination {}", dest.id);
        }
    }
}
