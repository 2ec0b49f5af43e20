pub mod admin_user;
pub mod audit;
pub mod billing;
pub mod invitation;
pub mod support;
pub mod tenant;
pub mod usage;

pub use admin_user::{AdminRole, AdminUser, NewAdminUser};
pub use audit::{AuditEntry, AuditFilter};
pub use billing::{PlanChange, Subscription};
pub use invitation::{Invitation, NewInvitation};
pub use support::{SupportTicket, TicketStatus};
pub use tenant::{Tenant, TenantStatus};
pub use usage::UsageSummary;

use serde::Serialize;

/// Offset pagination window shared by every list operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.page_size as i64
    }
}

/// One page of rows plus the total row count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
        }
    }
}
