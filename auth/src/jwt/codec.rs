use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;

/// Codec for signed access tokens.
///
/// Signs and verifies with a single symmetric secret using HS256. The same
/// secret must be used for both directions; the service loads it once at
/// startup and shares one codec instance process-wide.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from a signing secret.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// Claims are exactly `{sub, sub_id, iat, exp = now + TTL}`.
    ///
    /// # Errors
    /// * `SigningFailed` - signing with the configured secret failed
    pub fn generate(&self, subject: &str, subject_id: u64) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = AccessClaims::new(subject, subject_id);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Validate a token and recover `(subject, subject_id)`.
    ///
    /// Verifies the signature against the HS256 family only (a token whose
    /// header names any other algorithm is rejected as an invalid
    /// signature), then checks `exp` against wall-clock now with zero
    /// leeway. Pure function of `(token, secret, now)`.
    ///
    /// # Errors
    /// * `InvalidSignature` - signature mismatch or wrong signing algorithm
    /// * `Expired` - token is past its expiration
    /// * `MalformedClaims` - required claims missing or of the wrong type
    pub fn validate(&self, token: &str) -> Result<(String, u64), TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(classify_decode_error)?;

        Ok((token_data.claims.sub, token_data.claims.sub_id))
    }
}

fn classify_decode_error(error: jsonwebtoken::errors::Error) -> TokenError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::ImmatureSignature => {
            TokenError::InvalidSignature
        }
        _ => TokenError::MalformedClaims(error.to_string()),
    }
}
