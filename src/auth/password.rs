//! Password comparison against the credential store.

use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};

/// Prefix of a stored Argon2 PHC string
const ARGON2_PREFIX: &str = "$argon2";

/// Check a submitted password against a stored one.
///
/// Stored values are compared for exact equality, unless they are an Argon2
/// PHC string, in which case the submission is verified against the hash.
pub fn verify_password(submitted: &str, stored: &str) -> bool {
    if stored.starts_with(ARGON2_PREFIX) {
        return match PasswordHash::new(stored) {
            Ok(hash) => Argon2::default()
                .verify_password(submitted.as_bytes(), &hash)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password hash is not a valid PHC string: {}", e);
                false
            }
        };
    }
    submitted == stored
}
