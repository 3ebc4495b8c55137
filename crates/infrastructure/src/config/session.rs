//! Planning session configuration

use serde::{Deserialize, Serialize};

/// Settings for a planning session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAppConfig {
    /// E-mail of the signed-in user (unset means signed out)
    #[serde(default)]
    pub user_email: Option<String>,

    /// Capacity of the session's event channel
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

const fn default_event_buffer() -> usize {
    application::DEFAULT_EVENT_BUFFER
}

impl Default for SessionAppConfig {
    fn default() -> Self {
        Self {
            user_email: None,
            event_buffer: default_event_buffer(),
        }
    }
}

impl SessionAppConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.event_buffer == 0 {
            return Err("event_buffer must be greater than 0".to_string());
        }
        Ok(())
    }
}
