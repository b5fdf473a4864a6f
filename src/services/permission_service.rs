use std::collections::BTreeMap;
use std::sync::Arc;

use sea_orm::ConnectionTrait;

use crate::errors::InternalError;
use crate::providers::CurrentUserProvider;
use crate::stores::{AbilityStore, RoleStore, UserStore};
use crate::types::db::{ability, user};

/// Answers "does the current user have ability X?"
///
/// Abilities reach a user only through roles: user -> roles -> abilities.
/// Every check is read-only and resolves absence (unknown ability, no current
/// user) to `false`.
pub struct PermissionService {
    ability_store: Arc<AbilityStore>,
    role_store: Arc<RoleStore>,
    user_store: Arc<UserStore>,
}

impl PermissionService {
    pub fn new(
        ability_store: Arc<AbilityStore>,
        role_store: Arc<RoleStore>,
        user_store: Arc<UserStore>,
    ) -> Self {
        Self {
            ability_store,
            role_store,
            user_store,
        }
    }

    /// Check whether the user returned by `current_user` holds `ability_name`
    /// through any of its roles
    ///
    /// # Returns
    /// * `Ok(true)` - the ability is granted by at least one role
    /// * `Ok(false)` - no such ability, no current user, or not granted
    /// * `Err(InternalError)` - database failure
    pub async fn user_has_ability(
        &self,
        conn: &impl ConnectionTrait,
        ability_name: &str,
        current_user: &impl CurrentUserProvider,
    ) -> Result<bool, InternalError> {
        let Some(desired) = self.ability_store.find_by_name(conn, ability_name).await? else {
            tracing::debug!("Ability '{}' does not exist; denying", ability_name);
            return Ok(false);
        };

        let Some(user) = current_user.current_user() else {
            tracing::debug!("No current user; denying ability '{}'", desired.name);
            return Ok(false);
        };

        let granted = self
            .abilities_for_user(conn, &user)
            .await?
            .iter()
            .any(|a| a.id == desired.id);

        tracing::debug!(
            "Ability '{}' for user {}: {}",
            desired.name,
            user.id,
            if granted { "granted" } else { "denied" }
        );

        Ok(granted)
    }

    /// Union of the abilities granted by all of the user's roles, ordered by name
    pub async fn abilities_for_user(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
    ) -> Result<Vec<ability::Model>, InternalError> {
        let mut abilities = BTreeMap::new();

        for role in self.user_store.roles(conn, user).await? {
            for ability in self.role_store.abilities(conn, &role).await? {
                abilities.entry(ability.name.clone()).or_insert(ability);
            }
        }

        Ok(abilities.into_values().collect())
    }
}
