//! User identity, roles, and the signed-in session context.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Role granted to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular staff member.
    Employee,
    /// Department manager.
    Manager,
    /// Full administrative access.
    Admin,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

/// User profile as joined into task records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    full_name: String,
    email: String,
    role: UserRole,
}

impl User {
    /// Creates a user profile.
    #[must_use]
    pub fn new(
        id: UserId,
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            full_name: full_name.into(),
            email: email.into(),
            role,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the granted role.
    #[must_use]
    pub const fn role(&self) -> UserRole {
        self.role
    }

    /// Returns whether the user holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }
}

/// Signed-in session context.
///
/// Created at sign-in and passed explicitly into every operation needing the
/// acting user's identity, instead of living in a global mutable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: User,
}

impl Session {
    /// Opens a session for the given signed-in user.
    #[must_use]
    pub const fn new(user: User) -> Self {
        Self { user }
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Returns the acting user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user.id()
    }
}
