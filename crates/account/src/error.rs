use thiserror::Error;

/// Domain-specific errors for account operations
///
/// These errors represent business logic failures that should be
/// handled explicitly in the application layer (e.g., showing specific
/// error messages to users).
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account already exists")]
    AlreadyExists,

    #[error("account not found")]
    NotFound,

    /// Covers both a mismatched and an expired token. The two cases are
    /// deliberately indistinguishable to the caller.
    #[error("password reset token is not valid")]
    ResetTokenInvalid,

    #[error("password confirmation does not match")]
    PasswordConfirmationMismatch,

    #[error("password does not meet policy: {0}")]
    InvalidPassword(#[from] validator::ValidationErrors),

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Result type for account operations that may fail with AccountError
pub type AccountResult<T> = Result<T, AccountError>;
