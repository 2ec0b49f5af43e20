pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "admin-cli")]
#[command(about = "Admin CLI - command-line access to the admin gateway")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        env = "ADMIN_GATEWAY_URL",
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the gateway"
    )]
    pub url: String,

    #[arg(long, global = true, env = "ADMIN_GATEWAY_TOKEN", help = "Session token sent as a bearer token")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a development session token with the local secret")]
    Token {
        #[command(flatten)]
        args: commands::token::TokenArgs,
    },

    #[command(about = "Check gateway health")]
    Health,

    #[command(about = "Show the admin identity behind the token")]
    Whoami,

    #[command(about = "Tenant administration")]
    Tenant {
        #[command(subcommand)]
        cmd: commands::admin::TenantCommands,
    },

    #[command(about = "Support ticket administration")]
    Ticket {
        #[command(subcommand)]
        cmd: commands::admin::TicketCommands,
    },

    #[command(about = "Onboarding invitations")]
    Invite {
        #[command(subcommand)]
        cmd: commands::admin::InviteCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = client::AdminClient::new(&cli.url, cli.token.clone())?;

    match cli.command {
        Commands::Token { args } => commands::token::handle(args, output_format),
        Commands::Health => commands::admin::health(&client, output_format).await,
        Commands::Whoami => commands::admin::whoami(&client, output_format).await,
        Commands::Tenant { cmd } => commands::admin::handle_tenant(cmd, &client, output_format).await,
        Commands::Ticket { cmd } => commands::admin::handle_ticket(cmd, &client, output_format).await,
        Commands::Invite { cmd } => commands::admin::handle_invite(cmd, &client, output_format).await,
    }
}
