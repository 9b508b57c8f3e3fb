mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fetchwrap_lib::{ApiClient, ClientConfig};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fetchwrap")]
#[command(about = "Call a JSON HTTP API and report failures by status and message")]
struct Cli {
    /// Base URL of the API (overrides FETCHWRAP_API_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, fetch, create, update or delete users
    Users(commands::users::UsersArgs),
    /// Send an arbitrary request and print the JSON response
    Request(commands::request::RequestArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before the subscriber so RUST_LOG from .env applies. A missing file is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fetchwrap=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let config = ClientConfig::from_env_with_base_url(cli.base_url.as_deref())
        .context("failed to load client configuration")?;
    let client = ApiClient::from_config(config)?;

    let result = match &cli.command {
        Commands::Users(args) => commands::users::run(args, &client, &format).await,
        Commands::Request(args) => commands::request::run(args, &client).await,
    };

    if let Err(err) = result {
        if let Some(line) = output::describe_api_failure(&err) {
            eprintln!("{}", line);
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
