use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::Environment;

/// Default log level: DEBUG for `--verbose` or the local environment, INFO otherwise.
pub fn default_level(verbose: bool, environment: Environment) -> Level {
    if verbose || environment == Environment::Local {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

pub fn init_logging(verbose: bool, environment: Environment) -> Result<()> {
    let level = default_level(verbose, environment);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
        // Filter out noisy dependencies
        .add_directive("reqwest=warn".parse()?)
        .add_directive("rusqlite=warn".parse()?)
        .add_directive("actix_server=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
