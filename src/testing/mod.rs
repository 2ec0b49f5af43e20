//! In-memory repository and request helpers for handler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::auth::{generate_token, Claims, JwtSessionProvider, Role};
use crate::config::AppConfig;
use crate::database::models::{
    AdminUser, AuditEntry, AuditFilter, Invitation, NewAdminUser, NewInvitation, Page, PageRequest,
    Subscription, SupportTicket, Tenant, TenantStatus, TicketStatus, UsageSummary,
};
use crate::database::repository::{AdminRepository, RepositoryError, RepositoryResult};
use crate::state::AppState;

pub const TEST_SECRET: &str = "handler-test-secret";

pub const ACME: &str = "t-acme";
pub const GLOBEX: &str = "t-globex";
pub const TICKET_ID: &str = "7b0a3a4e-8d1c-4c53-9e0b-0f3f6c2b9a11";
pub const INVITATION_ID: &str = "c9d6f0b2-3a57-4d4b-8f5e-1e2d3c4b5a69";

#[derive(Default)]
struct MemoryData {
    tenants: Vec<Tenant>,
    admin_users: Vec<AdminUser>,
    audit: Vec<AuditEntry>,
    subscriptions: Vec<Subscription>,
    usage: Vec<UsageSummary>,
    tickets: Vec<SupportTicket>,
    invitations: Vec<Invitation>,
}

/// `AdminRepository` over plain vectors. Counts every call and every write.
#[derive(Default)]
pub struct MemoryRepository {
    data: Mutex<MemoryData>,
    calls: AtomicUsize,
    writes: AtomicUsize,
    failure: Mutex<Option<String>>,
    usage_since: Mutex<Option<DateTime<Utc>>>,
}

fn fixed_time(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
}

fn paginate<T: Clone>(rows: Vec<T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as i64;
    let items = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(items, page, total)
}

impl MemoryRepository {
    pub fn seeded() -> Self {
        let tenant = |id: &str, name: &str, completed: bool| Tenant {
            id: id.to_string(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            status: "active".to_string(),
            plan: "starter".to_string(),
            onboarding_completed: completed,
            created_at: fixed_time(1),
        };

        let data = MemoryData {
            tenants: vec![tenant(ACME, "Acme", true), tenant(GLOBEX, "Globex", false)],
            admin_users: vec![AdminUser {
                id: Uuid::nil(),
                email: "root@example.com".to_string(),
                role: "admin".to_string(),
                created_at: fixed_time(1),
            }],
            audit: (1..=3)
                .map(|day| AuditEntry {
                    id: Uuid::new_v4(),
                    tenant_id: Some((if day == 3 { GLOBEX } else { ACME }).to_string()),
                    actor_id: Some("admin-1".to_string()),
                    action: (if day == 1 { "tenant.created" } else { "plan.changed" }).to_string(),
                    target: None,
                    metadata: json!({ "day": day }),
                    created_at: fixed_time(day),
                })
                .collect(),
            subscriptions: vec![Subscription {
                tenant_id: ACME.to_string(),
                plan: "starter".to_string(),
                status: "active".to_string(),
                seats: 5,
                amount_cents: 4900,
                current_period_end: Some(fixed_time(28)),
            }],
            usage: vec![
                UsageSummary { tenant_id: ACME.to_string(), metric: "api_calls".to_string(), total: 1200 },
                UsageSummary { tenant_id: GLOBEX.to_string(), metric: "api_calls".to_string(), total: 80 },
            ],
            tickets: vec![SupportTicket {
                id: Uuid::parse_str(TICKET_ID).unwrap(),
                tenant_id: ACME.to_string(),
                subject: "Cannot export invoices".to_string(),
                status: "open".to_string(),
                priority: "high".to_string(),
                created_at: fixed_time(2),
                updated_at: fixed_time(2),
            }],
            invitations: vec![Invitation {
                id: Uuid::parse_str(INVITATION_ID).unwrap(),
                email: "owner@initech.io".to_string(),
                tenant_name: "Initech".to_string(),
                status: "pending".to_string(),
                invited_by: Some("admin-1".to_string()),
                created_at: fixed_time(3),
                expires_at: fixed_time(10),
            }],
        };

        Self {
            data: Mutex::new(data),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail with `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// `since` passed to the most recent usage query
    pub fn usage_since(&self) -> Option<DateTime<Utc>> {
        *self.usage_since.lock().unwrap()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn read(&self) -> RepositoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(RepositoryError::Invalid(message.clone())),
            None => Ok(()),
        }
    }

    fn write(&self) -> RepositoryResult<()> {
        self.read()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl AdminRepository for MemoryRepository {
    async fn health_check(&self) -> RepositoryResult<()> {
        self.read()
    }

    async fn list_tenants(&self, page: PageRequest, search: Option<String>) -> RepositoryResult<Page<Tenant>> {
        self.read()?;
        let data = self.data.lock().unwrap();
        let rows = data
            .tenants
            .iter()
            .filter(|t| match &search {
                Some(s) => t.name.to_lowercase().contains(&s.to_lowercase()),
                None => true,
            })
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn get_tenant(&self, id: &str) -> RepositoryResult<Tenant> {
        self.read()?;
        let data = self.data.lock().unwrap();
        data.tenants
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Tenant '{}'", id)))
    }

    async fn set_tenant_status(&self, id: &str, status: TenantStatus) -> RepositoryResult<Tenant> {
        self.write()?;
        let mut data = self.data.lock().unwrap();
        let tenant = data
            .tenants
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Tenant '{}'", id)))?;
        tenant.status = status.as_str().to_string();
        Ok(tenant.clone())
    }

    async fn complete_onboarding(&self, tenant_id: &str) -> RepositoryResult<Tenant> {
        self.write()?;
        let mut data = self.data.lock().unwrap();
        let tenant = data
            .tenants
            .iter_mut()
            .find(|t| t.id == tenant_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Tenant '{}'", tenant_id)))?;
        tenant.onboarding_completed = true;
        Ok(tenant.clone())
    }

    async fn list_admin_users(&self, page: PageRequest) -> RepositoryResult<Page<AdminUser>> {
        self.read()?;
        Ok(paginate(self.data.lock().unwrap().admin_users.clone(), page))
    }

    async fn create_admin_user(&self, user: NewAdminUser) -> RepositoryResult<AdminUser> {
        self.write()?;
        let row = AdminUser {
            id: Uuid::new_v4(),
            email: user.email,
            role: user.role.as_str().to_string(),
            created_at: Utc::now(),
        };
        self.data.lock().unwrap().admin_users.push(row.clone());
        Ok(row)
    }

    async fn list_audit_entries(&self, page: PageRequest, filter: AuditFilter) -> RepositoryResult<Page<AuditEntry>> {
        self.read()?;
        let data = self.data.lock().unwrap();
        let rows = data
            .audit
            .iter()
            .filter(|e| filter.tenant_id.is_none() || e.tenant_id == filter.tenant_id)
            .filter(|e| filter.action.as_ref().map_or(true, |a| &e.action == a))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn list_subscriptions(&self, page: PageRequest, status: Option<String>) -> RepositoryResult<Page<Subscription>> {
        self.read()?;
        let data = self.data.lock().unwrap();
        let rows = data
            .subscriptions
            .iter()
            .filter(|s| status.as_ref().map_or(true, |wanted| &s.status == wanted))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn change_plan(&self, tenant_id: &str, plan: &str) -> RepositoryResult<Subscription> {
        self.write()?;
        let mut data = self.data.lock().unwrap();
        let subscription = data
            .subscriptions
            .iter_mut()
            .find(|s| s.tenant_id == tenant_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Subscription for tenant '{}'", tenant_id)))?;
        subscription.plan = plan.to_string();
        Ok(subscription.clone())
    }

    async fn usage_summary(&self, tenant_id: Option<String>, since: DateTime<Utc>) -> RepositoryResult<Vec<UsageSummary>> {
        self.read()?;
        *self.usage_since.lock().unwrap() = Some(since);
        let data = self.data.lock().unwrap();
        Ok(data
            .usage
            .iter()
            .filter(|u| tenant_id.as_ref().map_or(true, |t| &u.tenant_id == t))
            .cloned()
            .collect())
    }

    async fn list_support_tickets(&self, page: PageRequest, status: Option<TicketStatus>) -> RepositoryResult<Page<SupportTicket>> {
        self.read()?;
        let data = self.data.lock().unwrap();
        let rows = data
            .tickets
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s.as_str()))
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn set_ticket_status(&self, id: Uuid, status: TicketStatus) -> RepositoryResult<SupportTicket> {
        self.write()?;
        let mut data = self.data.lock().unwrap();
        let ticket = data
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Support ticket '{}'", id)))?;
        ticket.status = status.as_str().to_string();
        ticket.updated_at = Utc::now();
        Ok(ticket.clone())
    }

    async fn list_pending_invitations(&self, page: PageRequest) -> RepositoryResult<Page<Invitation>> {
        self.read()?;
        let data = self.data.lock().unwrap();
        let rows = data
            .invitations
            .iter()
            .filter(|i| i.status == "pending")
            .cloned()
            .collect();
        Ok(paginate(rows, page))
    }

    async fn create_invitation(&self, invitation: NewInvitation, invited_by: &str) -> RepositoryResult<Invitation> {
        self.write()?;
        let now = Utc::now();
        let row = Invitation {
            id: Uuid::new_v4(),
            email: invitation.email,
            tenant_name: invitation.tenant_name,
            status: "pending".to_string(),
            invited_by: Some(invited_by.to_string()),
            created_at: now,
            expires_at: now + Duration::days(7),
        };
        self.data.lock().unwrap().invitations.push(row.clone());
        Ok(row)
    }

    async fn revoke_invitation(&self, id: Uuid) -> RepositoryResult<Invitation> {
        self.write()?;
        let mut data = self.data.lock().unwrap();
        let invitation = data
            .invitations
            .iter_mut()
            .find(|i| i.id == id && i.status == "pending")
            .ok_or_else(|| RepositoryError::NotFound(format!("Pending invitation '{}'", id)))?;
        invitation.status = "revoked".to_string();
        Ok(invitation.clone())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.api.enable_request_logging = false;
    config
}

/// Router over a seeded in-memory repository, plus a handle to inspect it
pub fn test_app() -> (Router, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::seeded());
    let sessions = JwtSessionProvider::new(TEST_SECRET).unwrap();
    let state = AppState::new(repository.clone(), Arc::new(sessions), test_config());
    (crate::routes::app(state), repository)
}

pub fn token_for(role: Role, tenant_id: Option<&str>) -> String {
    let claims = Claims::new("user-1", "user@example.com", role, tenant_id.map(String::from), 1);
    generate_token(&claims, TEST_SECRET).unwrap()
}

pub fn admin_token() -> String {
    token_for(Role::Admin, None)
}

pub fn tenant_token(tenant_id: &str) -> String {
    token_for(Role::Tenant, Some(tenant_id))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn send_raw(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Status and JSON body (`Value::Null` when the body is empty)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send_raw(app, request).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
