use sea_orm::entity::prelude::*;
use serde::de::DeserializeOwned;

use crate::errors::InternalError;
use crate::providers::PasswordProvider;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    pub name: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub password_hash: Option<String>,

    // Opaque application flag, stored and returned unchanged
    pub rule: Option<i32>,

    // Application-defined extension (JSON document)
    pub extension: Option<String>,

    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRole,
    #[sea_orm(has_many = "super::user_container::Entity")]
    UserContainer,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRole.def()
    }
}

impl Related<super::user_container::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserContainer.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_role::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_role::Relation::User.def().rev())
    }
}

impl Related<super::container::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_container::Relation::Container.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_container::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Check a plaintext password against the stored hash.
    ///
    /// Returns `false` when no hash has been set.
    pub fn verify_password(&self, hasher: &PasswordProvider, password: &str) -> bool {
        hasher.verify_password(password, self.password_hash.as_deref())
    }

    /// Decode the application-defined extension document, if one is stored.
    pub fn extension<T: DeserializeOwned>(&self) -> Result<Option<T>, InternalError> {
        match &self.extension {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|e| InternalError::parse("user extension", e.to_string())),
        }
    }
}
