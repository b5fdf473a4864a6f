// Test utilities shared across unit tests
// Only compiled when running tests

use sea_orm::DatabaseConnection;

use crate::config::{connect, install_schema};

/// Creates an in-memory SQLite database with the RBAC schema installed
pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    install_schema(&db)
        .await
        .expect("Failed to install schema");

    db
}
