use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("username must contain at least {min} characters")]
    TooShort { min: usize },

    #[error("username must not exceed {max} characters")]
    TooLong { max: usize },

    #[error("username can only contain letters, numbers, hyphens and underscores")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("invalid email address")]
    InvalidFormat,
}

/// Error for password strength policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("password must contain at least {min} characters")]
    TooShort { min: usize },

    #[error("password must not exceed {max} characters")]
    TooLong { max: usize },

    #[error("password must contain at least one digit")]
    MissingDigit,

    #[error("password must contain at least one letter")]
    MissingLetter,
}

/// Top-level error for authentication operations.
///
/// Display strings are the externally visible failure reasons, except for
/// the infrastructure variants (`Token`, `Hashing`, `Database`) whose detail
/// is logged and replaced with an opaque text at the RPC boundary.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("all fields are required")]
    MissingFields,

    #[error("username and password are required")]
    MissingCredentials,

    // Value object validation errors (automatically converted via #[from])
    #[error("{0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("{0}")]
    InvalidEmail(#[from] EmailError),

    #[error("{0}")]
    WeakPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("user with this username already exists")]
    UsernameAlreadyExists,

    #[error("user with this email already exists")]
    EmailAlreadyExists,

    /// Unknown account and wrong password collapse to this single reason so
    /// callers cannot enumerate accounts.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("profile not found")]
    ProfileNotFound,

    // Infrastructure errors
    #[error("token error: {0}")]
    Token(#[from] auth::TokenError),

    #[error("password hashing error: {0}")]
    Hashing(String),

    #[error("database error: {0}")]
    Database(String),
}
