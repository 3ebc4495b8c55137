//! Session adapter - Implements SessionPort from configuration
//!
//! Sign-in happens outside the planner; the signed-in user is handed to the
//! process through configuration.

use application::ports::{AuthenticatedUser, SessionPort};

/// Session backed by a fixed, pre-authenticated user
#[derive(Debug, Clone, Default)]
pub struct StaticSessionAdapter {
    user: Option<AuthenticatedUser>,
}

impl StaticSessionAdapter {
    /// Session for a signed-in user
    #[must_use]
    pub fn signed_in(email: impl Into<String>) -> Self {
        Self {
            user: Some(AuthenticatedUser {
                email: email.into(),
            }),
        }
    }

    /// Session with nobody signed in
    #[must_use]
    pub const fn signed_out() -> Self {
        Self { user: None }
    }

    /// Session from an optional configured e-mail; blank counts as signed out
    #[must_use]
    pub fn from_email(email: Option<&str>) -> Self {
        email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map_or_else(Self::signed_out, Self::signed_in)
    }
}

impl SessionPort for StaticSessionAdapter {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_in() {
        let session = StaticSessionAdapter::signed_in("ada@example.com");
        assert_eq!(
            session.current_user().map(|u| u.email),
            Some("ada@example.com".to_string())
        );
    }

    #[test]
    fn test_blank_email_is_signed_out() {
        assert!(StaticSessionAdapter::from_email(Some("  ")).current_user().is_none());
        assert!(StaticSessionAdapter::from_email(None).current_user().is_none());
        assert!(StaticSessionAdapter::from_email(Some("ada@example.com"))
            .current_user()
            .is_some());
    }
}
