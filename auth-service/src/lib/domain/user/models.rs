use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UsernameError;

/// Identity aggregate.
///
/// A registered account. The password hash never leaves the repository and
/// service layers; no RPC response carries it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of an identity before the store assigns its numeric handle.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
}

/// Companion profile record, created alongside each identity.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: String,
    pub bio: String,
    pub avatar_url: String,
    pub status: String,
    pub last_seen: DateTime<Utc>,
}

/// Result of a successful registration or login: the identity plus a signed
/// bearer token for it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

/// Opaque numeric identity handle (BIGSERIAL in the store).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// The handle as carried in token claims.
    pub fn as_u64(&self) -> u64 {
        self.0 as u64
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id as i64)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3-50 characters, ASCII letters, digits, underscore, and hyphen only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - shorter than 3 characters
    /// * `TooLong` - longer than 50 characters
    /// * `InvalidCharacters` - contains characters outside `[A-Za-z0-9_-]`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - not a well-formed email address
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|_| EmailError::InvalidFormat)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password that has passed the strength policy.
///
/// Held only transiently between validation and hashing.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// Validate password strength: 8-128 characters, at least one digit and
    /// at least one letter.
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.len();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(PasswordPolicyError::MissingLetter);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the plaintext
        f.write_str("Password(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_accepts_valid_names() {
        for name in ["bob", "alice-42", "under_score"] {
            assert!(Username::new(name.to_string()).is_ok(), "{name}");
        }
        assert!(Username::new("a".repeat(50)).is_ok());
    }

    #[test]
    fn test_username_length_limits() {
        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("a".repeat(51)),
            Err(UsernameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_username_charset() {
        for name in ["has space", "émile", "semi;colon", "dot.ted"] {
            assert!(matches!(
                Username::new(name.to_string()),
                Err(UsernameError::InvalidCharacters)
            ));
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("a@x.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(Password::new("pass1234".to_string()).is_ok());
        assert!(matches!(
            Password::new("p1".to_string()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(matches!(
            Password::new(format!("a1{}", "x".repeat(127))),
            Err(PasswordPolicyError::TooLong { .. })
        ));
        assert!(matches!(
            Password::new("lettersonly".to_string()),
            Err(PasswordPolicyError::MissingDigit)
        ));
        assert!(matches!(
            Password::new("12345678".to_string()),
            Err(PasswordPolicyError::MissingLetter)
        ));
    }

    #[test]
    fn test_password_debug_hides_plaintext() {
        let password = Password::new("pass1234".to_string()).unwrap();
        assert_eq!(format!("{:?}", password), "Password(..)");
    }

    #[test]
    fn test_user_id_round_trips_through_u64() {
        let id = UserId(42);
        assert_eq!(UserId::from(id.as_u64()), id);
    }
}
