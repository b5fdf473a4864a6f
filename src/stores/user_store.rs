use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};

use super::{ContainerStore, RoleStore};
use crate::errors::InternalError;
use crate::providers::PasswordProvider;
use crate::types::db::user::{self, ActiveModel, Entity as User};
use crate::types::db::user_container::{self, Entity as UserContainer};
use crate::types::db::user_role::{self, Entity as UserRole};
use crate::types::db::{container, role};
use crate::types::internal::NewUser;

/// UserStore owns the `users` table and the user-role / user-container links
///
/// The name-based membership methods stand in for collections of role and
/// container names: adding creates missing roles/containers, removing only
/// drops the link.
#[derive(Debug)]
pub struct UserStore {
    role_store: Arc<RoleStore>,
    container_store: Arc<ContainerStore>,
}

impl UserStore {
    pub fn new(role_store: Arc<RoleStore>, container_store: Arc<ContainerStore>) -> Self {
        Self {
            role_store,
            container_store,
        }
    }

    /// Create a user with its initial roles and containers
    ///
    /// Explicit role/container names win; otherwise the defaults carried by
    /// `new_user` apply. A plaintext password, if given, is hashed before insert.
    ///
    /// # Errors
    /// * `InternalError::Duplicate` - username or email already taken
    /// * `InternalError::Crypto` - password hashing failed
    /// * `InternalError::Database` - any other storage failure
    pub async fn create_user(
        &self,
        conn: &impl ConnectionTrait,
        hasher: &PasswordProvider,
        new_user: NewUser,
    ) -> Result<user::Model, InternalError> {
        let roles = new_user.resolved_roles();
        let containers = new_user.resolved_containers();

        let password_hash = match &new_user.password {
            Some(password) => Some(hasher.hash_password(password)?),
            None => None,
        };

        let now = Utc::now().timestamp();
        let username = new_user.username;

        let user = ActiveModel {
            username: Set(username.clone()),
            name: Set(new_user.name),
            email: Set(new_user.email),
            password_hash: Set(password_hash),
            rule: Set(new_user.rule),
            extension: Set(new_user.extension),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| InternalError::insert("insert_user", "user", &username, e))?;

        self.add_roles(conn, &user, &roles).await?;
        self.add_containers(conn, &user, &containers).await?;

        tracing::info!(
            "Created user '{}' (id {}) with roles {:?} and containers {:?}",
            user.username,
            user.id,
            roles,
            containers
        );

        Ok(user)
    }

    pub async fn find_by_id(
        &self,
        conn: &impl ConnectionTrait,
        user_id: i32,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find_by_id(user_id)
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_id", e))
    }

    pub async fn find_by_username(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_by_username", e))
    }

    /// Hash `password` and overwrite the stored hash
    pub async fn hash_password(
        &self,
        conn: &impl ConnectionTrait,
        hasher: &PasswordProvider,
        user: &user::Model,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let password_hash = hasher.hash_password(password)?;

        let mut active: ActiveModel = user.clone().into();
        active.password_hash = Set(Some(password_hash));
        active.updated_at = Set(Utc::now().timestamp());

        let updated = active
            .update(conn)
            .await
            .map_err(|e| InternalError::database("update_password_hash", e))?;

        tracing::debug!("Password hash updated for user {}", updated.id);
        Ok(updated)
    }

    /// Assign roles to a user, creating roles that do not exist yet
    pub async fn add_roles<S: AsRef<str>>(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
        roles: &[S],
    ) -> Result<(), InternalError> {
        for name in roles {
            let role = self.role_store.find_or_create(conn, name.as_ref()).await?;

            let existing = UserRole::find_by_id((user.id, role.id))
                .one(conn)
                .await
                .map_err(|e| InternalError::database("find_user_role", e))?;
            if existing.is_some() {
                continue;
            }

            user_role::ActiveModel {
                user_id: Set(user.id),
                role_id: Set(role.id),
            }
            .insert(conn)
            .await
            .map_err(|e| InternalError::insert("insert_user_role", "user role", &role.name, e))?;

            tracing::debug!("Assigned role '{}' to user {}", role.name, user.id);
        }

        Ok(())
    }

    /// Unassign roles; unknown or unassigned names are ignored
    pub async fn remove_roles<S: AsRef<str>>(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
        roles: &[S],
    ) -> Result<(), InternalError> {
        for name in roles {
            let Some(role) = self.role_store.find_by_name(conn, name.as_ref()).await? else {
                continue;
            };

            let result = UserRole::delete_many()
                .filter(user_role::Column::UserId.eq(user.id))
                .filter(user_role::Column::RoleId.eq(role.id))
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("delete_user_role", e))?;

            if result.rows_affected > 0 {
                tracing::debug!("Removed role '{}' from user {}", role.name, user.id);
            }
        }

        Ok(())
    }

    /// Add a user to containers, creating containers that do not exist yet
    pub async fn add_containers<S: AsRef<str>>(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
        containers: &[S],
    ) -> Result<(), InternalError> {
        for name in containers {
            let container = self.container_store.find_or_create(conn, name.as_ref()).await?;

            let existing = UserContainer::find_by_id((user.id, container.id))
                .one(conn)
                .await
                .map_err(|e| InternalError::database("find_user_container", e))?;
            if existing.is_some() {
                continue;
            }

            user_container::ActiveModel {
                user_id: Set(user.id),
                container_id: Set(container.id),
            }
            .insert(conn)
            .await
            .map_err(|e| InternalError::insert("insert_user_container", "user container", &container.name, e))?;

            tracing::debug!("Added user {} to container '{}'", user.id, container.name);
        }

        Ok(())
    }

    /// Remove a user from containers; unknown or unjoined names are ignored
    pub async fn remove_containers<S: AsRef<str>>(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
        containers: &[S],
    ) -> Result<(), InternalError> {
        for name in containers {
            let Some(container) = self.container_store.find_by_name(conn, name.as_ref()).await? else {
                continue;
            };

            let result = UserContainer::delete_many()
                .filter(user_container::Column::UserId.eq(user.id))
                .filter(user_container::Column::ContainerId.eq(container.id))
                .exec(conn)
                .await
                .map_err(|e| InternalError::database("delete_user_container", e))?;

            if result.rows_affected > 0 {
                tracing::debug!("Removed user {} from container '{}'", user.id, container.name);
            }
        }

        Ok(())
    }

    pub async fn roles(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
    ) -> Result<Vec<role::Model>, InternalError> {
        user.find_related(role::Entity)
            .order_by_asc(role::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_user_roles", e))
    }

    pub async fn role_names(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
    ) -> Result<Vec<String>, InternalError> {
        Ok(self.roles(conn, user).await?.into_iter().map(|r| r.name).collect())
    }

    pub async fn containers(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
    ) -> Result<Vec<container::Model>, InternalError> {
        user.find_related(container::Entity)
            .order_by_asc(container::Column::Name)
            .all(conn)
            .await
            .map_err(|e| InternalError::database("find_user_containers", e))
    }

    pub async fn container_names(
        &self,
        conn: &impl ConnectionTrait,
        user: &user::Model,
    ) -> Result<Vec<String>, InternalError> {
        Ok(self
            .containers(conn, user)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }
}
