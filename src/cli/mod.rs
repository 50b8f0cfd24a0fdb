use clap::{Parser, Subcommand};

use crate::auth::{self, Claims};
use crate::config;

#[derive(Parser)]
#[command(name = "sentinel")]
#[command(about = "Sentinel CLI - operational helpers for the monitoring API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a bearer token for local development and testing")]
    Token {
        #[arg(long, help = "User id to embed as the token subject")]
        user: String,

        #[arg(long, help = "Optional email claim")]
        email: Option<String>,
    },

    #[command(about = "Print the effective configuration as JSON (secrets redacted)")]
    Config,

    #[command(about = "Probe a running server's health endpoint")]
    Health {
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        url: String,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Token { user, email } => {
            let claims = Claims::new(user, email);
            let token = auth::issue_token(&claims)?;
            println!("{}", token);
            Ok(())
        }
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(config::config())?);
            Ok(())
        }
        Commands::Health { url } => {
            let body: serde_json::Value = reqwest::get(format!("{}/health", url))
                .await?
                .json()
                .await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
            Ok(())
        }
    }
}
