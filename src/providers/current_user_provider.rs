use crate::types::db::user;

/// Source of the active user for permission checks
///
/// Supplied by the host application's authentication or session layer.
/// Closures returning `Option<user::Model>` implement it directly.
pub trait CurrentUserProvider {
    fn current_user(&self) -> Option<user::Model>;
}

impl<F> CurrentUserProvider for F
where
    F: Fn() -> Option<user::Model>,
{
    fn current_user(&self) -> Option<user::Model> {
        self()
    }
}

/// Provider for a user that is already loaded
pub struct FixedUser(pub Option<user::Model>);

impl CurrentUserProvider for FixedUser {
    fn current_user(&self) -> Option<user::Model> {
        self.0.clone()
    }
}
