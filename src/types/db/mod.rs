// Database entities - SeaORM models
pub mod ability;
pub mod container;
pub mod role;
pub mod role_ability;
pub mod user;
pub mod user_container;
pub mod user_role;
