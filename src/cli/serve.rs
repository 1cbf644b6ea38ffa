use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::config::Config;
use crate::server;
use crate::services::SimpleServices;

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Listen address, overrides the configured one
    #[arg(short, long, value_name = "HOST:PORT")]
    address: Option<String>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(address) = args.address {
        config.address = address;
        config.validate()?;
    }

    info!("Using database at {}", config.database_path.display());
    let services = SimpleServices::from_config(config).await?;

    server::run(services).await?;
    Ok(())
}
