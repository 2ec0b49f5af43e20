pub mod admin_users;
pub mod audit;
pub mod billing;
pub mod onboarding;
pub mod support;
pub mod tenants;
pub mod usage;
pub mod whoami;

pub use admin_users::{admin_user_create, admin_user_list};
pub use audit::audit_list;
pub use billing::{billing_list, billing_plan_change};
pub use onboarding::{invitation_create, invitation_list, invitation_revoke};
pub use support::{ticket_list, ticket_status_update};
pub use tenants::{tenant_list, tenant_show, tenant_status_update};
pub use usage::usage_get;
pub use whoami::whoami_get;
