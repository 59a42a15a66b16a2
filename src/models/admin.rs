//! Admin account and authentication DTOs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Minimum password length accepted for admin accounts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Role attached to an admin session or account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SuperAdmin => "Super Admin",
        }
    }
}

/// An administrator account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub date_creation: Option<String>,
}

impl AdminAccount {
    /// The superadmin account is protected from deletion.
    pub fn can_be_deleted(&self) -> bool {
        self.role != Role::SuperAdmin
    }
}

/// Shown in place of secrets in `Debug` output.
pub(crate) const REDACTED: &str = "***";

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

/// DTO for creating an admin account.
#[derive(Clone, Default, Serialize)]
pub struct NewAdmin {
    pub username: String,
    pub password: String,
}

impl NewAdmin {
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(AppError::validation("Le nom d'utilisateur est requis"));
        }
        validate_password(&self.password)
    }
}

/// Body of a password change.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password: String,
}

impl ChangePassword {
    /// Build the request, checking the confirmation field first.
    ///
    /// Nothing is sent to the server when this fails.
    pub fn from_form(old_password: &str, new_password: &str, confirm_password: &str) -> Result<Self> {
        if new_password != confirm_password {
            return Err(AppError::validation("Les mots de passe ne correspondent pas"));
        }
        if old_password.is_empty() {
            return Err(AppError::validation("L'ancien mot de passe est requis"));
        }
        validate_password(new_password)?;

        Ok(Self {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        })
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &REDACTED)
            .field("role", &self.role)
            .finish()
    }
}

impl fmt::Debug for NewAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAdmin")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for ChangePassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePassword")
            .field("old_password", &REDACTED)
            .field("new_password", &REDACTED)
            .finish()
    }
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Le mot de passe doit contenir au moins {MIN_PASSWORD_LEN} caractères"
        )));
    }
    Ok(())
}
