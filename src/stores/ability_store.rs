use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use super::normalize_name;
use crate::errors::InternalError;
use crate::types::db::ability::{self, ActiveModel, Entity as Ability};

/// AbilityStore owns the `abilities` table
///
/// Ability names are case-insensitive: they are lowercased before every
/// lookup and insert.
#[derive(Debug, Default)]
pub struct AbilityStore {}

impl AbilityStore {
    pub fn new() -> Self {
        Self {}
    }

    pub async fn find_by_name(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<Option<ability::Model>, InternalError> {
        Ability::find()
            .filter(ability::Column::Name.eq(normalize_name(name)))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_ability_by_name", e))
    }

    /// Return the ability called `name`, creating it when it does not exist yet
    pub async fn find_or_create(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<ability::Model, InternalError> {
        if let Some(existing) = self.find_by_name(conn, name).await? {
            return Ok(existing);
        }

        let name = normalize_name(name);
        let created = ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::insert("insert_ability", "ability", &name, e))?;

        tracing::debug!("Created ability '{}' (id {})", created.name, created.id);
        Ok(created)
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<ability::Model>, InternalError> {
        Ability::find()
            .order_by_asc(ability::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_abilities", e))
    }
}
