use clap::Subcommand;
use serde_json::json;

use crate::cli::client::AdminClient;
use crate::cli::{utils, OutputFormat};

#[derive(Subcommand)]
pub enum TenantCommands {
    #[command(about = "List tenants")]
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, help = "Match against tenant name or slug")]
        search: Option<String>,
    },

    #[command(about = "Show one tenant")]
    Show {
        #[arg(help = "Tenant id")]
        id: String,
    },

    #[command(about = "Set tenant status (active, suspended, pending)")]
    Status {
        #[arg(help = "Tenant id")]
        id: String,
        #[arg(help = "New status")]
        status: String,
    },
}

#[derive(Subcommand)]
pub enum TicketCommands {
    #[command(about = "List support tickets")]
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        status: Option<String>,
    },

    #[command(about = "Set ticket status (open, pending, closed)")]
    Status {
        #[arg(help = "Ticket id")]
        id: String,
        #[arg(help = "New status")]
        status: String,
    },
}

#[derive(Subcommand)]
pub enum InviteCommands {
    #[command(about = "List pending invitations")]
    List,

    #[command(about = "Invite a new tenant owner")]
    Send {
        #[arg(help = "Owner email")]
        email: String,
        #[arg(help = "Tenant name")]
        tenant_name: String,
    },

    #[command(about = "Revoke a pending invitation")]
    Revoke {
        #[arg(help = "Invitation id")]
        id: String,
    },
}

pub async fn health(client: &AdminClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = client.get("/health", &[]).await?;
    utils::output_value(&output_format, &body)
}

pub async fn whoami(client: &AdminClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = client.get("/api/admin/whoami", &[]).await?;
    utils::output_value(&output_format, &body)
}

pub async fn handle_tenant(cmd: TenantCommands, client: &AdminClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = match cmd {
        TenantCommands::List { page, page_size, search } => {
            let mut query = utils::page_query(page, page_size);
            if let Some(search) = search {
                query.push(("search", search));
            }
            client.get("/api/admin/tenants", &query).await?
        }
        TenantCommands::Show { id } => client.get(&format!("/api/admin/tenants/{}", id), &[]).await?,
        TenantCommands::Status { id, status } => {
            client
                .post(&format!("/api/admin/tenants/{}/status", id), &json!({ "status": status }))
                .await?
        }
    };
    utils::output_value(&output_format, &body)
}

pub async fn handle_ticket(cmd: TicketCommands, client: &AdminClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = match cmd {
        TicketCommands::List { page, status } => {
            let mut query = utils::page_query(page, None);
            if let Some(status) = status {
                query.push(("status", status));
            }
            client.get("/api/admin/support-tickets", &query).await?
        }
        TicketCommands::Status { id, status } => {
            client
                .post(&format!("/api/admin/support-tickets/{}/status", id), &json!({ "status": status }))
                .await?
        }
    };
    utils::output_value(&output_format, &body)
}

pub async fn handle_invite(cmd: InviteCommands, client: &AdminClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let body = match cmd {
        InviteCommands::List => client.get("/api/admin/onboarding", &[]).await?,
        InviteCommands::Send { email, tenant_name } => {
            client
                .post("/api/admin/onboarding/invite", &json!({ "email": email, "tenantName": tenant_name }))
                .await?
        }
        InviteCommands::Revoke { id } => {
            client
                .post(&format!("/api/admin/onboarding/{}/revoke", id), &json!({}))
                .await?
        }
    };
    utils::output_value(&output_format, &body)
}
