use thiserror::Error;

pub mod crypto;
pub mod database;
pub mod user;

pub use crypto::CryptoError;
pub use database::DatabaseError;
pub use user::UserError;

/// Internal error type for store and service operations
///
/// Infrastructure errors (database, crypto, parse) sit next to the
/// domain errors raised by lookups. Absence during permission queries and
/// membership removal is not an error and never reaches this type.
#[derive(Error, Debug)]
pub enum InternalError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// A unique column (name, username, email, membership pair) already holds this value
    #[error("Duplicate {entity}: {value}")]
    Duplicate { entity: &'static str, value: String },

    #[error("Parse error: failed to parse {value_type}: {message}")]
    Parse { value_type: String, message: String },

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    User(#[from] UserError),
}

impl InternalError {
    pub fn database(operation: &str, source: sea_orm::DbErr) -> InternalError {
        InternalError::Database(DatabaseError::Operation {
            operation: operation.to_string(),
            source,
        })
    }

    /// Map an insert failure, turning unique constraint violations into `Duplicate`
    pub fn insert(
        operation: &str,
        entity: &'static str,
        value: &str,
        source: sea_orm::DbErr,
    ) -> InternalError {
        match source.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => InternalError::Duplicate {
                entity,
                value: value.to_owned(),
            },
            _ => InternalError::database(operation, source),
        }
    }

    pub fn parse(value_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            value_type: value_type.into(),
            message: message.into(),
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, InternalError::Duplicate { .. })
    }
}
