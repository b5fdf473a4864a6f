#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Password hashing failed during {operation}: {message}")]
    PasswordHash {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid password pepper: {message}")]
    InvalidPepper { message: String },
}

impl CryptoError {
    pub fn password_hash(operation: &'static str, err: argon2::password_hash::Error) -> Self {
        Self::PasswordHash {
            operation,
            message: err.to_string(),
        }
    }
}
