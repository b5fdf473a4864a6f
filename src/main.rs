use std::sync::Arc;

use clap::Parser;

use linkstash_rbac::cli::{execute_command, Cli};
use linkstash_rbac::config::{init_logging, ConfigError, LoggingConfig, RbacSettings, SystemEnvironment};
use linkstash_rbac::AppData;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(&LoggingConfig::from_env_provider(&SystemEnvironment)).map_err(ConfigError::from)?;

    let cli = Cli::parse();

    let settings = RbacSettings::from_env_provider(Arc::new(SystemEnvironment))?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let app_data = AppData::init(settings).await?;

    execute_command(cli, &app_data).await
}
