use std::fmt;
use std::sync::Arc;

use super::errors::ConfigError;
use super::{EnvironmentProvider, SystemEnvironment};
use crate::errors::InternalError;
use crate::providers::password_provider::{PasswordProvider, MIN_PEPPER_LENGTH};
use crate::types::internal::{NewUser, DEFAULT_CONTAINER, DEFAULT_ROLE};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://rbac.db?mode=rwc";

/// Settings for the RBAC layer
///
/// | Variable | Default |
/// |---|---|
/// | `DATABASE_URL` | `sqlite://rbac.db?mode=rwc` |
/// | `DEFAULT_ROLE` | `user` (empty disables) |
/// | `DEFAULT_CONTAINER` | `all` (empty disables) |
/// | `PASSWORD_PEPPER` | unset |
#[derive(Clone)]
pub struct RbacSettings {
    database_url: String,
    default_role: Option<String>,
    default_container: Option<String>,
    password_pepper: Option<String>,
}

impl RbacSettings {
    pub fn from_env_provider(env_provider: Arc<dyn EnvironmentProvider + Send + Sync>) -> Result<Self, ConfigError> {
        let database_url = env_provider
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::invalid("DATABASE_URL", "must not be empty"));
        }

        let default_role = Self::optional_name(env_provider.as_ref(), "DEFAULT_ROLE", DEFAULT_ROLE);
        let default_container = Self::optional_name(env_provider.as_ref(), "DEFAULT_CONTAINER", DEFAULT_CONTAINER);

        let password_pepper = env_provider.get_var("PASSWORD_PEPPER");
        if let Some(pepper) = &password_pepper {
            if pepper.len() < MIN_PEPPER_LENGTH {
                return Err(ConfigError::invalid(
                    "PASSWORD_PEPPER",
                    format!("must be at least {} characters long, got {}", MIN_PEPPER_LENGTH, pepper.len()),
                ));
            }
        }

        Ok(Self {
            database_url,
            default_role,
            default_container,
            password_pepper,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(Arc::new(SystemEnvironment))
    }

    // Unset falls back to the built-in default; set-but-empty disables it
    fn optional_name(env_provider: &(dyn EnvironmentProvider + Send + Sync), key: &str, default: &str) -> Option<String> {
        match env_provider.get_var(key) {
            None => Some(default.to_string()),
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(value.trim().to_string()),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn default_role(&self) -> Option<&str> {
        self.default_role.as_deref()
    }

    pub fn default_container(&self) -> Option<&str> {
        self.default_container.as_deref()
    }

    /// `NewUser` pre-filled with the configured role and container defaults
    pub fn new_user(&self, username: impl Into<String>) -> NewUser {
        NewUser::new(username)
            .default_role(self.default_role.clone())
            .default_container(self.default_container.clone())
    }

    pub fn password_provider(&self) -> Result<PasswordProvider, InternalError> {
        match &self.password_pepper {
            Some(pepper) => PasswordProvider::with_pepper(pepper.clone()),
            None => Ok(PasswordProvider::new()),
        }
    }
}

impl fmt::Debug for RbacSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbacSettings")
            .field("database_url", &self.database_url)
            .field("default_role", &self.default_role)
            .field("default_container", &self.default_container)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapEnvironment;

    fn settings(env: MapEnvironment) -> Result<RbacSettings, ConfigError> {
        RbacSettings::from_env_provider(Arc::new(env))
    }

    #[test]
    fn test_defaults() {
        let settings = settings(MapEnvironment::empty()).unwrap();

        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.default_role(), Some("user"));
        assert_eq!(settings.default_container(), Some("all"));
    }

    #[test]
    fn test_overrides() {
        let env = MapEnvironment::empty()
            .with_var("DATABASE_URL", "sqlite::memory:")
            .with_var("DEFAULT_ROLE", "member")
            .with_var("DEFAULT_CONTAINER", "global");
        let settings = settings(env).unwrap();

        assert_eq!(settings.database_url(), "sqlite::memory:");
        assert_eq!(settings.default_role(), Some("member"));
        assert_eq!(settings.default_container(), Some("global"));
    }

    #[test]
    fn test_empty_default_role_disables_it() {
        let settings = settings(MapEnvironment::empty().with_var("DEFAULT_ROLE", "")).unwrap();

        assert_eq!(settings.default_role(), None);
        assert!(settings.new_user("alice").resolved_roles().is_empty());
        assert_eq!(settings.new_user("alice").resolved_containers(), vec!["all".to_string()]);
    }

    #[test]
    fn test_empty_database_url_fails_validation() {
        let result = settings(MapEnvironment::empty().with_var("DATABASE_URL", ""));

        match result {
            Err(ConfigError::InvalidSetting { setting_name, .. }) => assert_eq!(setting_name, "DATABASE_URL"),
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_short_pepper_fails_validation() {
        let result = settings(MapEnvironment::empty().with_var("PASSWORD_PEPPER", "short"));

        match result {
            Err(ConfigError::InvalidSetting { setting_name, reason }) => {
                assert_eq!(setting_name, "PASSWORD_PEPPER");
                assert!(reason.contains("at least 16 characters"));
            }
            other => panic!("Expected InvalidSetting for PASSWORD_PEPPER, got: {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_pepper() {
        let env = MapEnvironment::empty().with_var("PASSWORD_PEPPER", "pepper-for-unit-tests");
        let settings = settings(env).unwrap();

        let debug = format!("{:?}", settings);
        assert!(!debug.contains("pepper-for-unit-tests"));
        assert!(settings.password_provider().is_ok());
    }
}
