#![allow(non_snake_case)]

use std::env;

use dayPlanner::cli;
use dayPlanner::config::{AppConfig, Settings};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_else(|err| {
            warn!("Ignoring config file {}: {}", path, err);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    };
    let settings = Settings::from_config(&config)?;

    cli::cli(settings).await?;
    Ok(())
}
