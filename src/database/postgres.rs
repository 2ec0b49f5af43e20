use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{
    AdminUser, AuditEntry, AuditFilter, Invitation, NewAdminUser, NewInvitation, Page, PageRequest,
    Subscription, SupportTicket, Tenant, TenantStatus, TicketStatus, UsageSummary,
};
use crate::database::repository::{AdminRepository, RepositoryError, RepositoryResult};

/// Days an onboarding invitation stays valid
const INVITATION_TTL_DAYS: i64 = 7;

const TENANT_COLUMNS: &str = "id, name, slug, status, plan, onboarding_completed, created_at";
const TICKET_COLUMNS: &str = "id, tenant_id, subject, status, priority, created_at, updated_at";
const INVITATION_COLUMNS: &str = "id, email, tenant_name, status, invited_by, created_at, expires_at";
const SUBSCRIPTION_COLUMNS: &str = "tenant_id, plan, status, seats, amount_cents, current_period_end";

/// ILIKE pattern matching `term` anywhere, with its wildcards taken literally
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// `AdminRepository` backed by the hosted Postgres database.
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn not_found(err: sqlx::Error, what: impl Into<String>) -> RepositoryError {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound(what.into()),
            other => RepositoryError::Sqlx(other),
        }
    }
}

#[async_trait]
impl AdminRepository for PgRepository {
    async fn health_check(&self) -> RepositoryResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_tenants(&self, page: PageRequest, search: Option<String>) -> RepositoryResult<Page<Tenant>> {
        let pattern = search.map(|s| contains_pattern(&s));

        let query = format!(
            "SELECT {TENANT_COLUMNS} FROM tenants \
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\' OR slug ILIKE $1 ESCAPE '\\') \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, Tenant>(&query)
            .bind(&pattern)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tenants \
             WHERE ($1::text IS NULL OR name ILIKE $1 ESCAPE '\\' OR slug ILIKE $1 ESCAPE '\\')",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page::new(items, page, total))
    }

    async fn get_tenant(&self, id: &str) -> RepositoryResult<Tenant> {
        let query = format!("SELECT {TENANT_COLUMNS} FROM tenants WHERE id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::not_found(e, format!("Tenant '{}'", id)))
    }

    async fn set_tenant_status(&self, id: &str, status: TenantStatus) -> RepositoryResult<Tenant> {
        let query = format!("UPDATE tenants SET status = $2 WHERE id = $1 RETURNING {TENANT_COLUMNS}");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::not_found(e, format!("Tenant '{}'", id)))
    }

    async fn complete_onboarding(&self, tenant_id: &str) -> RepositoryResult<Tenant> {
        let query = format!(
            "UPDATE tenants SET onboarding_completed = TRUE WHERE id = $1 RETURNING {TENANT_COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(tenant_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::not_found(e, format!("Tenant '{}'", tenant_id)))
    }

    async fn list_admin_users(&self, page: PageRequest) -> RepositoryResult<Page<AdminUser>> {
        let items = sqlx::query_as::<_, AdminUser>(
            "SELECT id, email, role, created_at FROM admin_users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    async fn create_admin_user(&self, user: NewAdminUser) -> RepositoryResult<AdminUser> {
        let row = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (id, email, role, created_at) VALUES ($1, $2, $3, NOW()) \
             RETURNING id, email, role, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_audit_entries(&self, page: PageRequest, filter: AuditFilter) -> RepositoryResult<Page<AuditEntry>> {
        let items = sqlx::query_as::<_, AuditEntry>(
            "SELECT id, tenant_id, actor_id, action, target, metadata, created_at FROM audit_log \
             WHERE ($1::text IS NULL OR tenant_id = $1) AND ($2::text IS NULL OR action = $2) \
             ORDER BY created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(&filter.tenant_id)
        .bind(&filter.action)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM audit_log \
             WHERE ($1::text IS NULL OR tenant_id = $1) AND ($2::text IS NULL OR action = $2)",
        )
        .bind(&filter.tenant_id)
        .bind(&filter.action)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page::new(items, page, total))
    }

    async fn list_subscriptions(&self, page: PageRequest, status: Option<String>) -> RepositoryResult<Page<Subscription>> {
        let query = format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY tenant_id LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, Subscription>(&query)
            .bind(&status)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subscriptions WHERE ($1::text IS NULL OR status = $1)")
                .bind(&status)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(items, page, total))
    }

    async fn change_plan(&self, tenant_id: &str, plan: &str) -> RepositoryResult<Subscription> {
        let query = format!(
            "UPDATE subscriptions SET plan = $2 WHERE tenant_id = $1 RETURNING {SUBSCRIPTION_COLUMNS}"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(tenant_id)
            .bind(plan)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::not_found(e, format!("Subscription for tenant '{}'", tenant_id)))
    }

    async fn usage_summary(&self, tenant_id: Option<String>, since: DateTime<Utc>) -> RepositoryResult<Vec<UsageSummary>> {
        let rows = sqlx::query_as::<_, UsageSummary>(
            "SELECT tenant_id, metric, COALESCE(SUM(quantity), 0)::bigint AS total FROM usage_events \
             WHERE ($1::text IS NULL OR tenant_id = $1) AND recorded_at >= $2 \
             GROUP BY tenant_id, metric ORDER BY tenant_id, metric",
        )
        .bind(&tenant_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_support_tickets(&self, page: PageRequest, status: Option<TicketStatus>) -> RepositoryResult<Page<SupportTicket>> {
        let status = status.map(|s| s.as_str());

        let query = format!(
            "SELECT {TICKET_COLUMNS} FROM support_tickets \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY updated_at DESC LIMIT $2 OFFSET $3"
        );
        let items = sqlx::query_as::<_, SupportTicket>(&query)
            .bind(status)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM support_tickets WHERE ($1::text IS NULL OR status = $1)")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;

        Ok(Page::new(items, page, total))
    }

    async fn set_ticket_status(&self, id: Uuid, status: TicketStatus) -> RepositoryResult<SupportTicket> {
        let query = format!(
            "UPDATE support_tickets SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {TICKET_COLUMNS}"
        );
        sqlx::query_as::<_, SupportTicket>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::not_found(e, format!("Support ticket '{}'", id)))
    }

    async fn list_pending_invitations(&self, page: PageRequest) -> RepositoryResult<Page<Invitation>> {
        let query = format!(
            "SELECT {INVITATION_COLUMNS} FROM invitations WHERE status = 'pending' \
             ORDER BY created_at DESC LIMIT $1 OFFSET $2"
        );
        let items = sqlx::query_as::<_, Invitation>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM invitations WHERE status = 'pending'")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(items, page, total))
    }

    async fn create_invitation(&self, invitation: NewInvitation, invited_by: &str) -> RepositoryResult<Invitation> {
        let expires_at = Utc::now() + Duration::days(INVITATION_TTL_DAYS);

        let query = format!(
            "INSERT INTO invitations (id, email, tenant_name, status, invited_by, created_at, expires_at) \
             VALUES ($1, $2, $3, 'pending', $4, NOW(), $5) RETURNING {INVITATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Invitation>(&query)
            .bind(Uuid::new_v4())
            .bind(&invitation.email)
            .bind(&invitation.tenant_name)
            .bind(invited_by)
            .bind(expires_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(row)
    }

    async fn revoke_invitation(&self, id: Uuid) -> RepositoryResult<Invitation> {
        let query = format!(
            "UPDATE invitations SET status = 'revoked' WHERE id = $1 AND status = 'pending' \
             RETURNING {INVITATION_COLUMNS}"
        );
        sqlx::query_as::<_, Invitation>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::not_found(e, format!("Pending invitation '{}'", id)))
    }
}
