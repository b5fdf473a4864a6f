use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::{self, RbacSettings};
use crate::errors::InternalError;
use crate::providers::PasswordProvider;
use crate::services::PermissionService;
use crate::stores::{AbilityStore, ContainerStore, RoleStore, UserStore};

/// Shared application data: the database connection plus every store and
/// service, each created once and shared through `Arc`
///
/// ```text
/// AppData::init(settings)
///   ├─ db (DatabaseConnection, schema installed)
///   ├─ ability_store
///   ├─ role_store       ─ uses ability_store
///   ├─ container_store
///   ├─ user_store       ─ uses role_store, container_store
///   ├─ permission_service ─ uses ability_store, role_store, user_store
///   └─ password_provider (pepper from settings)
/// ```
pub struct AppData {
    pub db: DatabaseConnection,
    pub settings: RbacSettings,
    pub password_provider: Arc<PasswordProvider>,
    pub ability_store: Arc<AbilityStore>,
    pub role_store: Arc<RoleStore>,
    pub container_store: Arc<ContainerStore>,
    pub user_store: Arc<UserStore>,
    pub permission_service: Arc<PermissionService>,
}

impl AppData {
    /// Connect to the configured database, install the schema and build the stores
    pub async fn init(settings: RbacSettings) -> Result<Self, InternalError> {
        tracing::info!("Initializing AppData...");

        let db = config::connect(settings.database_url()).await?;
        config::install_schema(&db).await?;

        let app_data = Self::from_connection(db, settings)?;

        tracing::info!("AppData initialization complete");
        Ok(app_data)
    }

    /// Build the stores over an existing connection whose schema is already installed
    pub fn from_connection(db: DatabaseConnection, settings: RbacSettings) -> Result<Self, InternalError> {
        let password_provider = Arc::new(settings.password_provider()?);

        let ability_store = Arc::new(AbilityStore::new());
        let role_store = Arc::new(RoleStore::new(ability_store.clone()));
        let container_store = Arc::new(ContainerStore::new());
        let user_store = Arc::new(UserStore::new(role_store.clone(), container_store.clone()));
        let permission_service = Arc::new(PermissionService::new(
            ability_store.clone(),
            role_store.clone(),
            user_store.clone(),
        ));

        Ok(Self {
            db,
            settings,
            password_provider,
            ability_store,
            role_store,
            container_store,
            user_store,
            permission_service,
        })
    }
}
