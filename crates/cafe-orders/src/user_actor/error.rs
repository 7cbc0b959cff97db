//! Error types for the User actor and the account operations.

use crate::model::UserId;
use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required fields are missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// A user with the same email already exists.
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    /// Unknown email or wrong password. The two are not told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// An underlying store error occurred.
    #[error(transparent)]
    Store(#[from] StoreError),
}
