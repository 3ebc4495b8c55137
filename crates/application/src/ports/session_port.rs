//! Authentication session port
//!
//! The planner only needs to know whether somebody is signed in; sign-in,
//! registration and sign-out screens live outside the core.

#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// The signed-in user, as shown in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Account e-mail address
    pub email: String,
}

/// Port for the authentication collaborator
#[cfg_attr(test, automock)]
pub trait SessionPort: Send + Sync {
    /// The currently signed-in user, if any
    fn current_user(&self) -> Option<AuthenticatedUser>;
}

/// The signed-in user, or `NotAuthorized` when nobody is signed in
pub fn require_user(port: &dyn SessionPort) -> Result<AuthenticatedUser, ApplicationError> {
    port.current_user()
        .ok_or_else(|| ApplicationError::NotAuthorized("no active session".to_string()))
}
