use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, EntityTrait, Schema, TransactionTrait,
};

use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;
use crate::types::db::{ability, container, role, role_ability, user, user_container, user_role};

/// Connect to the database at `database_url`
///
/// Does NOT create tables - call [`install_schema`] separately.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database: {}", database_url);

    Ok(db)
}

/// Create the RBAC tables when they do not exist yet
///
/// Tables are derived from the entity definitions, including unique columns,
/// composite keys on the link tables and their cascading foreign keys.
/// Entity tables are created before the link tables that reference them.
pub async fn install_schema(conn: &impl ConnectionTrait) -> Result<(), InternalError> {
    create_table(conn, user::Entity).await?;
    create_table(conn, role::Entity).await?;
    create_table(conn, ability::Entity).await?;
    create_table(conn, container::Entity).await?;
    create_table(conn, user_role::Entity).await?;
    create_table(conn, user_container::Entity).await?;
    create_table(conn, role_ability::Entity).await?;

    tracing::debug!("RBAC schema installed");

    Ok(())
}

async fn create_table<E: EntityTrait>(conn: &impl ConnectionTrait, entity: E) -> Result<(), InternalError> {
    let backend = conn.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();

    conn.execute(backend.build(&statement))
        .await
        .map_err(|e| InternalError::database("create_table", e))?;

    Ok(())
}

pub async fn begin_transaction(db: &DatabaseConnection) -> Result<DatabaseTransaction, InternalError> {
    db.begin()
        .await
        .map_err(|source| InternalError::Database(DatabaseError::TransactionBegin { source }))
}

pub async fn commit_transaction(txn: DatabaseTransaction) -> Result<(), InternalError> {
    txn.commit()
        .await
        .map_err(|source| InternalError::Database(DatabaseError::TransactionCommit { source }))
}
