use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::admin_user::is_plausible_email;
use crate::database::repository::RepositoryError;

/// Invitation sent to a new tenant's owner; `pending` until accepted or revoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: Uuid,
    pub email: String,
    pub tenant_name: String,
    pub status: String,
    pub invited_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvitation {
    pub email: String,
    pub tenant_name: String,
}

impl NewInvitation {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if !is_plausible_email(&self.email) {
            return Err(RepositoryError::Invalid(format!("Invalid email address: '{}'", self.email)));
        }
        if self.tenant_name.trim().is_empty() {
            return Err(RepositoryError::Invalid("Tenant name is required".to_string()));
        }
        Ok(())
    }
}
