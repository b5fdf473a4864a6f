pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;
pub mod settings;

pub use database::{begin_transaction, commit_transaction, connect, install_schema};
pub use env_provider::{EnvironmentProvider, MapEnvironment, SystemEnvironment};
pub use errors::ConfigError;
pub use logging::{init_logging, LoggingConfig};
pub use settings::RbacSettings;
