//! Auth collaborator: exposes the current user, or none.
//!
//! Session management itself is external; the publish workflow only
//! needs to know who (if anyone) is signed in.

/// Source of the current user's identity.
pub trait AuthProvider: Send + Sync {
    /// The signed-in user's id, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<String>;
}

/// Auth provider with a fixed identity, for single-session deployments
/// and tests.
#[derive(Debug, Clone, Default)]
pub struct FixedAuth {
    user: Option<String>,
}

impl FixedAuth {
    /// A provider that reports `user_id` as signed in.
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user: Some(user_id.into()),
        }
    }

    /// A provider with nobody signed in.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl AuthProvider for FixedAuth {
    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }
}
