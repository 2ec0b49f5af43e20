use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::RepositoryError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub tenant_id: String,
    pub plan: String,
    pub status: String,
    pub seats: i32,
    pub amount_cents: i64,
    pub current_period_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanChange {
    pub plan: String,
}

impl PlanChange {
    pub fn validate(&self) -> Result<(), RepositoryError> {
        if self.plan.trim().is_empty() {
            return Err(RepositoryError::Invalid("Plan is required".to_string()));
        }
        Ok(())
    }
}
