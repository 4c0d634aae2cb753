use crate::proto::AuthResponse;
use crate::user::errors::AuthError;

pub mod get_profile;
pub mod login;
pub mod register;

/// Map a domain failure to the in-band failure response.
///
/// Domain failures carry their reason verbatim; infrastructure failures are
/// logged with detail and collapsed to opaque texts so nothing internal
/// reaches the caller.
pub(crate) fn failure_response(error: &AuthError) -> AuthResponse {
    let error_text = match error {
        AuthError::Database(detail) => {
            tracing::error!(error = %detail, "Persistence failure");
            "persistence error".to_string()
        }
        AuthError::Hashing(detail) => {
            tracing::error!(error = %detail, "Password hashing failure");
            "internal error".to_string()
        }
        AuthError::Token(e) => {
            tracing::error!(error = %e, "Token generation failed");
            "error generating token".to_string()
        }
        other => other.to_string(),
    };

    AuthResponse {
        success: false,
        token: String::new(),
        error_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_failures_keep_their_reason() {
        let response = failure_response(&AuthError::UsernameAlreadyExists);
        assert!(!response.success);
        assert!(response.token.is_empty());
        assert_eq!(
            response.error_text,
            "user with this username already exists"
        );
    }

    #[test]
    fn test_infrastructure_detail_is_not_leaked() {
        let response = failure_response(&AuthError::Database(
            "connection refused at 10.0.0.5:5432".to_string(),
        ));
        assert_eq!(response.error_text, "persistence error");
        assert!(!response.error_text.contains("10.0.0.5"));
    }
}
