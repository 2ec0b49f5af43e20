use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::RepositoryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    Support,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Support => "support",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAdminUser {
    pub email: String,
    pub role: AdminRole,
}

impl NewAdminUser {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if !is_plausible_email(&self.email) {
            return Err(RepositoryError::Invalid(format!("Invalid email address: '{}'", self.email)));
        }
        Ok(())
    }
}

/// Loose check only; the auth provider owns real address verification.
pub(crate) fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(char::is_whitespace),
        None => false,
    }
}
