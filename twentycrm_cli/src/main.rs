mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use twentycrm_api::Client;

#[derive(Parser)]
#[command(name = "twentycrm")]
#[command(about = "Work with records in a Twenty CRM instance")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records in a collection
    List(commands::list::ListArgs),
    /// Fetch a single record by ID
    Get(commands::record::GetArgs),
    /// Create a record
    Create(commands::record::CreateArgs),
    /// Update a record from a JSON fields object
    Update(commands::record::UpdateArgs),
    /// Delete a record by ID
    Delete(commands::record::DeleteArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("twentycrm_api=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let base_url = std::env::var("TWENTY_API_URL")
        .context("TWENTY_API_URL is not set (your Twenty instance URL)")?;
    let api_key =
        std::env::var("TWENTY_API_KEY").context("TWENTY_API_KEY is not set")?;
    let client = Client::new(&base_url, &api_key)?;

    match &cli.command {
        Commands::List(args) => commands::list::run(args, &client).await?,
        Commands::Get(args) => commands::record::get(args, &client).await?,
        Commands::Create(args) => commands::record::create(args, &client).await?,
        Commands::Update(args) => commands::record::update(args, &client).await?,
        Commands::Delete(args) => commands::record::delete(args, &client).await?,
    }

    Ok(())
}
