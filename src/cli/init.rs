use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::services::SimpleServices;

#[derive(Args)]
pub struct InitArgs {}

pub async fn execute(_args: InitArgs, config: &Config) -> Result<()> {
    info!("Initializing song database at: {}", config.database_path.display());

    SimpleServices::create_database(config).await?;

    println!("Database ready: {}", config.database_path.display());
    println!("Run 'song-library serve' to start the server");

    Ok(())
}
