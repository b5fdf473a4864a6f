// Common test utilities for integration tests

use std::sync::Arc;

use linkstash_rbac::config::{connect, install_schema, MapEnvironment, RbacSettings};
use linkstash_rbac::AppData;
use sea_orm::DatabaseConnection;

/// Creates a test database with the schema installed
pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    install_schema(&db)
        .await
        .expect("Failed to install schema");

    db
}

/// Creates AppData over a fresh in-memory database with the given environment
pub async fn setup_app_data(env: MapEnvironment) -> AppData {
    let settings = RbacSettings::from_env_provider(Arc::new(env))
        .expect("Failed to load test settings");
    let db = setup_test_db().await;

    AppData::from_connection(db, settings).expect("Failed to build AppData")
}
