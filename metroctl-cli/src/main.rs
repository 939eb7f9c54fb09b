//! metroctl CLI - subway line management service
//!
//! This is the main entry point for the metroctl command-line tool, which
//! provides:
//! - HTTP API server for stations, lines, and sections (`serve` subcommand)
//! - Standalone schema migration (`migrate` subcommand)

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use metroctl_server::db::migrations;
use metroctl_server::{create_pool, run_server, ServerConfig};

mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "metroctl",
    author,
    version,
    about = "Subway line management backend",
    long_about = "Manage subway stations, lines, and the ordered section chains that \
                  compose each line, over an HTTP API backed by PostgreSQL."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run migrations and start the HTTP server
    Serve(ServeArgs),
    /// Run schema migrations and exit
    Migrate(MigrateArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1:3080")]
    bind: SocketAddr,

    /// Allow requests from any origin (development only)
    #[arg(long)]
    cors_permissive: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(clap::Args, Debug)]
struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap resolves env-backed arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Migrate(args) => migrate(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("failed to connect to database")?;

    migrations::run(&pool).await.context("migrations failed")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(pool, config).await.context("server failed")?;
    Ok(())
}

async fn migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&args.database_url)
        .await
        .context("failed to connect to database")?;

    migrations::run(&pool).await.context("migrations failed")?;

    info!("Migrations applied");
    Ok(())
}
