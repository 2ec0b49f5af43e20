use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Summed usage for one tenant and metric over the requested window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub tenant_id: String,
    pub metric: String,
    pub total: i64,
}
