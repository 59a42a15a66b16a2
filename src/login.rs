//! Login form state.

use crate::error::{FALLBACK_MESSAGE, Result};
use crate::models::LoginResponse;

#[derive(Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    in_flight: bool,
    error: Option<String>,
}

impl LoginForm {
    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.username.trim().is_empty() && !self.password.is_empty()
    }

    /// Credentials to send, or `None` when incomplete or already submitted.
    pub fn submit(&mut self) -> Option<(String, String)> {
        if !self.can_submit() {
            return None;
        }
        self.in_flight = true;
        self.error = None;
        Some((self.username.trim().to_string(), self.password.clone()))
    }

    /// Handle the login response; returns the session data on success.
    pub fn finished(&mut self, result: Result<LoginResponse>) -> Option<LoginResponse> {
        self.in_flight = false;
        match result {
            Ok(response) => {
                self.password.clear();
                Some(response)
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.error = Some(e.user_message(FALLBACK_MESSAGE));
                None
            }
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
