//! Authentication primitives for the gateway
//!
//! Provides the two building blocks the service composes:
//! - Password hashing (Argon2id)
//! - Signed access token generation and validation
//!
//! The signing secret is always injected explicitly by the caller; there is
//! no ambient global, so tests can supply deterministic secrets.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.generate("alice", 1).unwrap();
//! let (subject, subject_id) = codec.validate(&token).unwrap();
//! assert_eq!(subject, "alice");
//! assert_eq!(subject_id, 1);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::AccessClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
