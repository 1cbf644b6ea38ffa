use anyhow::Result;
use clap::Args;

use crate::config::Config as AppConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Print the default configuration file path instead
    #[arg(long)]
    path: bool,
}

pub async fn execute(args: ConfigArgs, config: &AppConfig) -> Result<()> {
    if args.path {
        match AppConfig::default_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("No configuration directory available on this platform"),
        }
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
