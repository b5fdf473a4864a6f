use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use super::{normalize_name, AbilityStore};
use crate::errors::InternalError;
use crate::types::db::ability;
use crate::types::db::role::{self, ActiveModel, Entity as Role};
use crate::types::db::role_ability::{self, Entity as RoleAbility};

/// RoleStore owns the `roles` table and the role-ability links
///
/// Role names are lowercased before every lookup and insert.
#[derive(Debug)]
pub struct RoleStore {
    ability_store: Arc<AbilityStore>,
}

impl RoleStore {
    pub fn new(ability_store: Arc<AbilityStore>) -> Self {
        Self { ability_store }
    }

    pub async fn find_by_name(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<Option<role::Model>, InternalError> {
        Role::find()
            .filter(role::Column::Name.eq(normalize_name(name)))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role_by_name", e))
    }

    /// Return the role called `name`, creating it when it does not exist yet
    pub async fn find_or_create(
        &self,
        conn: &impl ConnectionTrait,
        name: &str,
    ) -> Result<role::Model, InternalError> {
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
        .map_err(|e| InternalError::insert("insert_role", "role", &name, e))?;

        tracing::debug!("Created role '{}' (id {})", created.name, created.id);
        Ok(created)
    }

    pub async fn list(&self, conn: &impl ConnectionTrait) -> Result<Vec<role::Model>, InternalError> {
        Role::find()
            .order_by_asc(role::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("list_roles", e))
    }

    /// Grant abilities to a role
    ///
    /// Missing abilities are created. Abilities the role already has are skipped,
    /// so repeating a name leaves a single link.
    pub async fn add_abilities<S: AsRef<str>>(
        &self,
        conn: &impl ConnectionTrait,
        role: &role::Model,
        abilities: &[S],
    ) -> Result<(), InternalError> {
        for name in abilities {
            let ability = self.ability_store.find_or_create(conn, name.as_ref()).await?;

            if self.has_link(conn, role.id, ability.id).await? {
                continue;
            }

            role_ability::ActiveModel {
                role_id: Set(role.id),
                ability_id: Set(ability.id),
            }
            .insert(conn)
            .await
            .map_err(|e| InternalError::insert("insert_role_ability", "role ability", &ability.name, e))?;

            tracing::debug!("Granted ability '{}' to role '{}'", ability.name, role.name);
        }

        Ok(())
    }

    /// Revoke abilities from a role
    ///
    /// Unknown ability names and abilities the role does not hold are ignored.
    /// The ability rows themselves are kept.
    pub async fn remove_abilities<S: AsRef<str>>(
        &self,
        conn: &impl ConnectionTrait,
        role: &role::Model,
        abilities: &[S],
    ) -> Result<(), InternalError> {
        for name in abilities {
            let Some(ability) = self.ability_store.find_by_name(conn, name.as_ref()).await? else {
                continue;
            };

            let result = RoleAbility::delete_many()
                .filter(role_ability::Column::RoleId.eq(role.id))
                .filter(role_ability::Column::AbilityId.eq(ability.id))
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("delete_role_ability", e))?;

            if result.rows_affected > 0 {
                tracing::debug!("Revoked ability '{}' from role '{}'", ability.name, role.name);
            }
        }

        Ok(())
    }

    /// Abilities granted to a role, ordered by name
    pub async fn abilities(
        &self,
        conn: &impl ConnectionTrait,
        role: &role::Model,
    ) -> Result<Vec<ability::Model>, InternalError> {
        role.find_related(ability::Entity)
            .order_by_asc(ability::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_role_abilities", e))
    }

    pub async fn ability_names(
        &self,
        conn: &impl ConnectionTrait,
        role: &role::Model,
    ) -> Result<Vec<String>, InternalError> {
        Ok(self
            .abilities(conn, role)
            .await?
            .into_iter()
            .map(|a| a.name)
            .collect())
    }

    async fn has_link(
        &self,
        conn: &impl ConnectionTrait,
        role_id: i32,
        ability_id: i32,
    ) -> Result<bool, InternalError> {
        let link = RoleAbility::find_by_id((role_id, ability_id))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_role_ability", e))?;
        Ok(link.is_some())
    }
}
