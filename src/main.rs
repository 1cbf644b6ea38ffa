use clap::{Parser, Subcommand};

mod cli;
mod config;
mod core;
mod error;
mod server;
mod services;
mod signal_handler;
mod utils;

use cli::*;
use config::Config;
use error::Result;

#[derive(Parser)]
#[command(name = "song-library")]
#[command(about = "HTTP service for managing a song library")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long, global = true, value_name = "FILE")]
    env_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),

    /// Create the song database and exit
    Init(init::InitArgs),

    /// Show configuration
    Config(cli::config::ConfigArgs),
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_deref(), cli.env_file.as_deref())?;

    // Initialize logging
    utils::logging::init_logging(cli.verbose, config.environment)
        .map_err(error::SongLibraryError::Internal)?;

    let command = cli.command.unwrap_or(Commands::Serve(serve::ServeArgs::default()));
    match command {
        Commands::Serve(args) => serve::execute(args, config).await,
        Commands::Init(args) => init::execute(args, &config).await,
        Commands::Config(args) => cli::config::execute(args, &config).await,
    }
    .map_err(error::SongLibraryError::Internal)
}
