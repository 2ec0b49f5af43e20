use clap::{Args, ValueEnum};
use serde_json::json;

use crate::auth::{generate_token, Claims, Role};
use crate::cli::{utils, OutputFormat};
use crate::config;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TokenRole {
    Admin,
    Tenant,
}

impl From<TokenRole> for Role {
    fn from(role: TokenRole) -> Self {
        match role {
            TokenRole::Admin => Role::Admin,
            TokenRole::Tenant => Role::Tenant,
        }
    }
}

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(help = "User id (token subject)")]
    pub user_id: String,

    #[arg(help = "User email")]
    pub email: String,

    #[arg(long, value_enum, default_value = "admin")]
    pub role: TokenRole,

    #[arg(long, help = "Tenant the session belongs to")]
    pub tenant: Option<String>,

    #[arg(long, help = "Lifetime in hours (defaults to configured expiry)")]
    pub hours: Option<u64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let auth = &config::config().auth;
    let hours = args.hours.unwrap_or(auth.token_expiry_hours);

    let claims = Claims::new(args.user_id, args.email, args.role.into(), args.tenant, hours);
    let token = generate_token(&claims, &auth.jwt_secret)?;

    match output_format {
        OutputFormat::Json => utils::output_value(
            &output_format,
            &json!({ "token": token, "expiresAt": claims.exp }),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
