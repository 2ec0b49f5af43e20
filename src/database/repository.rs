use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{
    AdminUser, AuditEntry, AuditFilter, Invitation, NewAdminUser, NewInvitation, Page, PageRequest,
    Subscription, SupportTicket, Tenant, TenantStatus, TicketStatus, UsageSummary,
};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Invalid(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Data access for the admin console and client dashboard.
///
/// One method per resource operation; each is a direct pass-through to the
/// backing store.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn health_check(&self) -> RepositoryResult<()>;

    // Tenants
    async fn list_tenants(&self, page: PageRequest, search: Option<String>) -> RepositoryResult<Page<Tenant>>;
    async fn get_tenant(&self, id: &str) -> RepositoryResult<Tenant>;
    async fn set_tenant_status(&self, id: &str, status: TenantStatus) -> RepositoryResult<Tenant>;
    async fn complete_onboarding(&self, tenant_id: &str) -> RepositoryResult<Tenant>;

    // Admin users
    async fn list_admin_users(&self, page: PageRequest) -> RepositoryResult<Page<AdminUser>>;
    async fn create_admin_user(&self, user: NewAdminUser) -> RepositoryResult<AdminUser>;

    // Audit log
    async fn list_audit_entries(&self, page: PageRequest, filter: AuditFilter) -> RepositoryResult<Page<AuditEntry>>;

    // Billing
    async fn list_subscriptions(&self, page: PageRequest, status: Option<String>) -> RepositoryResult<Page<Subscription>>;
    async fn change_plan(&self, tenant_id: &str, plan: &str) -> RepositoryResult<Subscription>;

    // Usage
    async fn usage_summary(&self, tenant_id: Option<String>, since: DateTime<Utc>) -> RepositoryResult<Vec<UsageSummary>>;

    // Support
    async fn list_support_tickets(&self, page: PageRequest, status: Option<TicketStatus>) -> RepositoryResult<Page<SupportTicket>>;
    async fn set_ticket_status(&self, id: Uuid, status: TicketStatus) -> RepositoryResult<SupportTicket>;

    // Onboarding
    async fn list_pending_invitations(&self, page: PageRequest) -> RepositoryResult<Page<Invitation>>;
    async fn create_invitation(&self, invitation: NewInvitation, invited_by: &str) -> RepositoryResult<Invitation>;
    async fn revoke_invitation(&self, id: Uuid) -> RepositoryResult<Invitation>;
}
