use serde::Serialize;

use super::names::Names;
use crate::errors::InternalError;

pub const DEFAULT_ROLE: &str = "user";
pub const DEFAULT_CONTAINER: &str = "all";

/// Input for [`crate::stores::UserStore::create_user`]
///
/// Built with chained setters. Role and container defaults start as
/// `"user"` and `"all"`; pass `None` to `default_role` / `default_container`
/// to disable them.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub rule: Option<i32>,
    pub extension: Option<String>,
    pub roles: Names,
    pub containers: Names,
    pub default_role: Option<String>,
    pub default_container: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: None,
            email: None,
            password: None,
            rule: None,
            extension: None,
            roles: Names::None,
            containers: Names::None,
            default_role: Some(DEFAULT_ROLE.to_owned()),
            default_container: Some(DEFAULT_CONTAINER.to_owned()),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Plaintext password, hashed when the user is created
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn rule(mut self, rule: i32) -> Self {
        self.rule = Some(rule);
        self
    }

    pub fn roles(mut self, roles: impl Into<Names>) -> Self {
        self.roles = roles.into();
        self
    }

    pub fn containers(mut self, containers: impl Into<Names>) -> Self {
        self.containers = containers.into();
        self
    }

    pub fn default_role(mut self, role: Option<impl Into<String>>) -> Self {
        self.default_role = role.map(Into::into);
        self
    }

    pub fn default_container(mut self, container: Option<impl Into<String>>) -> Self {
        self.default_container = container.map(Into::into);
        self
    }

    /// Attach an application-defined extension, stored as JSON
    pub fn extension<T: Serialize>(mut self, extension: &T) -> Result<Self, InternalError> {
        let raw = serde_json::to_string(extension)
            .map_err(|e| InternalError::parse("user extension", e.to_string()))?;
        self.extension = Some(raw);
        Ok(self)
    }

    pub fn resolved_roles(&self) -> Vec<String> {
        self.roles.resolve(self.default_role.as_deref())
    }

    pub fn resolved_containers(&self) -> Vec<String> {
        self.containers.resolve(self.default_container.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_new_user_defaults() {
        let new_user = NewUser::new("alice");
        assert_eq!(new_user.resolved_roles(), vec!["user".to_string()]);
        assert_eq!(new_user.resolved_containers(), vec!["all".to_string()]);
    }

    #[test]
    fn test_explicit_roles_replace_default() {
        let new_user = NewUser::new("alice").roles(["editor", "admin"]).containers("sales");
        assert_eq!(new_user.resolved_roles(), vec!["editor".to_string(), "admin".to_string()]);
        assert_eq!(new_user.resolved_containers(), vec!["sales".to_string()]);
    }

    #[test]
    fn test_disabled_defaults_leave_sets_empty() {
        let new_user = NewUser::new("alice")
            .default_role(None::<String>)
            .default_container(Some(""));
        assert!(new_user.resolved_roles().is_empty());
        assert!(new_user.resolved_containers().is_empty());
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Profile {
        department: String,
    }

    #[test]
    fn test_extension_is_serialized_as_json() {
        let new_user = NewUser::new("alice")
            .extension(&Profile { department: "ops".to_string() })
            .unwrap();
        assert_eq!(new_user.extension.as_deref(), Some(r#"{"department":"ops"}"#));
    }
}
