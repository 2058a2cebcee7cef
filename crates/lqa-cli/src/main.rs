//! LQA CLI - Command-line interface
//!
//! Usage:
//!   lqa submit --query <text> --document <path> [--server <url>]
//!   lqa ask --query <text> --document <path> [--mock]

mod client;

use clap::{Parser, Subcommand};
use client::{build_submission, SubmitClient};
use lqa_core::{AppConfig, RelayMode, SubmitResponse};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lqa")]
#[command(about = "Legal Query Assistant CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a query to a running relay server
    Submit {
        /// Legal question to ask
        #[arg(short, long)]
        query: String,
        /// Document the question refers to (only its name is sent)
        #[arg(short, long)]
        document: PathBuf,
        /// Relay server base URL
        #[arg(long, env = "LQA_SERVER", default_value = "http://localhost:8080")]
        server: String,
        /// Request timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
    /// Answer a query in-process with the configured backend
    Ask {
        /// Legal question to ask
        #[arg(short, long)]
        query: String,
        /// Document the question refers to (only its name is used)
        #[arg(short, long)]
        document: PathBuf,
        /// Use the mock backend instead of the upstream API
        #[arg(long)]
        mock: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lqa_cli=info,lqa_relay=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            query,
            document,
            server,
            timeout_secs,
        } => {
            let request = build_submission(&query, &document)?;
            let client = SubmitClient::new(&server, Duration::from_secs(timeout_secs))?;
            client.submit(&request, |response| render(&response)).await;
        }
        Commands::Ask {
            query,
            document,
            mock,
        } => {
            let request = build_submission(&query, &document)?;
            let mut config = AppConfig::from_env()?;
            if mock {
                config.relay.mode = RelayMode::Mock;
            }
            let backend = lqa_relay::create_backend(&config)?;
            let response = backend.submit(&request).await?;
            render(&response);
        }
    }

    Ok(())
}

fn render(response: &SubmitResponse) {
    println!("Query Response");
    println!("{}", response.query_response);
    println!();
    println!("Document Summary");
    println!("{}", response.summary);
}
