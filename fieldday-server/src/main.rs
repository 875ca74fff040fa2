//! fieldday - school sports sign-up server
//!
//! Subcommands:
//! - `serve`: run the HTTP server (gallery, join flow, bookings, admin)
//! - `init-db`: create the database file and schema, then exit

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fieldday_server::server::{self, ServeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "fieldday",
    author,
    version,
    about = "School sports sign-up server: public gallery, join flow, and admin"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Create the database file and schema, then exit
    InitDb(InitDbArgs),
}

#[derive(Parser, Debug)]
struct InitDbArgs {
    /// Database file path (default: ~/.fieldday/fieldday.db)
    #[arg(long, env = "FIELDDAY_DB")]
    db_path: Option<PathBuf>,
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args).await?,
        Commands::InitDb(args) => run_init_db(args)?,
    }
    Ok(())
}

fn run_init_db(args: InitDbArgs) -> Result<()> {
    let db_path = args.db_path.unwrap_or_else(server::default_db_path);
    let db = fieldday_core::Database::open(&db_path)?;
    info!("Database ready at {}", db.path().display());
    Ok(())
}
