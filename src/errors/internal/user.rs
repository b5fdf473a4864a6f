use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("User not found: {username}")]
    UserNotFound { username: String },
}
