use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::InternalError;
use crate::types::db::container::{self, ActiveModel, Entity as Container};

/// ContainerStore owns the `containers` table
///
/// Container names are stored exactly as given.
#[derive(Debug, Default)]
pub struct ContainerStore {}

impl ContainerStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_name(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<Option<container::Model>, InternalError> {
        Container::find()
            .filter(container::Column::Name.eq(name))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_container_by_name", e))
    }

    /// Return the container called `name`, creating it when it does not exist yet
    pub async fn find_or_create(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<container::Model, InternalError> {
        if let Some(existing) = self.find_by_name(conn, name).await? {
            return Ok(existing);
        }

        let created = ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::insert("insert_container", "container", name, e))?;

        tracing::debug!("Created container '{}' (id {})", created.name, created.id);
        Ok(created)
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<container::Model>, InternalError> {
        Container::find()
            .order_by_asc(container::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_containers", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_db;

    #[tokio::test]
    async fn test_container_name_kept_as_given() {
        let db = setup_test_db().await;
        let store = ContainerStore::new();

        let container = store.find_or_create(&db, "Sales-EU").await.unwrap();
        assert_eq!(container.name, "Sales-EU");
    }

    #[tokio::test]
    async fn test_find_or_create_returns_same_row() {
        let db = setup_test_db().await;
        let store = ContainerStore::new();

        let first = store.find_or_create(&db, "all").await.unwrap();
        let second = store.find_or_create(&db, "all").await.unwrap();
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let db = setup_test_db().await;
        let store = ContainerStore::new();

        store.find_or_create(&db, "Ops").await.unwrap();
        assert!(store.find_by_name(&db, "Ops").await.unwrap().is_some());
        assert!(store.find_by_name(&db, "ops").await.unwrap().is_none());
        assert!(store.find_by_name(&db, "OPS").await.unwrap().is_none());
        assert!(store.find_by_name(&db, "missing").await.unwrap().is_none());
        assert_eq!(store.list(&db).await.unwrap().len(), 1);
    }
}
