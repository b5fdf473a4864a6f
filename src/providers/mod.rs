// Providers layer - Collaborators supplied to stores and services
pub mod current_user_provider;
pub mod password_provider;

pub use current_user_provider::{CurrentUserProvider, FixedUser};
pub use password_provider::PasswordProvider;
