// Internal types - inputs to stores and services
pub mod names;
pub mod new_user;

pub use names::Names;
pub use new_user::{NewUser, DEFAULT_CONTAINER, DEFAULT_ROLE};
