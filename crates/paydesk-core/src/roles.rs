//! Role resolution at the backend boundary.
//!
//! The backend reports roles as free-form strings. Everything downstream
//! (endpoint selection, menu visibility, route guards) switches on the
//! closed [`Role`] enum, never on the raw string.

use serde::{Deserialize, Serialize};

/// Coarse authorization class for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Collapses the backend-supplied role string into a [`Role`].
    ///
    /// Exactly `"Admin"` maps to admin and exactly `"Merchant"` maps to
    /// user; any other value, including a missing one, maps to user so an
    /// unknown role never grants admin access.
    pub fn resolve(raw: Option<&str>) -> Role {
        match raw {
            Some("Admin") => Role::Admin,
            Some("Merchant") => Role::User,
            _ => Role::User,
        }
    }

    /// Returns the string identifier used in persisted sessions and display.
    pub fn id(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Returns the human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::User => "Merchant",
        }
    }

    /// Returns all roles.
    pub fn all() -> &'static [Role] {
        &[Role::Admin, Role::User]
    }
}
