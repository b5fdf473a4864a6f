// Stores layer - Data access and repository pattern
pub mod ability_store;
pub mod container_store;
pub mod role_store;
pub mod user_store;

pub use ability_store::AbilityStore;
pub use container_store::ContainerStore;
pub use role_store::RoleStore;
pub use user_store::UserStore;

/// Role and ability names are case-insensitive and stored lowercase
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}
