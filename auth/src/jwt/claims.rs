use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Fixed token lifetime. Deliberately a constant rather than configuration:
/// a single auditable TTL for every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by an access token.
///
/// The claim set is the minimum needed to resolve an identity without a
/// store round-trip: the account name and its numeric handle. All fields
/// are required; a token missing any of them is rejected at validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject (account name)
    pub sub: String,

    /// Numeric identity handle of the subject
    pub sub_id: u64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a subject, expiring [`TOKEN_TTL_HOURS`] from now.
    pub fn new(subject: impl Into<String>, subject_id: u64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(TOKEN_TTL_HOURS);

        Self {
            sub: subject.into(),
            sub_id: subject_id,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
