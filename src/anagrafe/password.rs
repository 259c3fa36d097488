//! One-way password hashing.
//!
//! Passwords are stored as bcrypt modular-crypt strings: the algorithm,
//! cost factor, and random salt are all embedded in the output, so the same
//! secret hashes to a different string on every call and no external salt
//! storage is needed.

use bcrypt::{BcryptError, DEFAULT_COST};
use tracing::error;

/// bcrypt only consumes the first 72 bytes of input.
const BCRYPT_MAX_BYTES: usize = 72;

/// Same truncation on both the hashing and verification path, bytes past the
/// limit never participate in the digest.
fn truncate(secret: &str) -> &[u8] {
    let bytes = secret.as_bytes();
    &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)]
}

/// Hash a plaintext secret with a fresh random salt.
///
/// # Errors
/// Returns an error if the hashing backend fails.
pub fn hash(secret: &str) -> Result<String, BcryptError> {
    hash_with_cost(secret, DEFAULT_COST)
}

pub(crate) fn hash_with_cost(secret: &str, cost: u32) -> Result<String, BcryptError> {
    bcrypt::hash(truncate(secret), cost)
}

/// Check a plaintext candidate against a stored hash.
///
/// Fail-closed: a malformed or foreign-format stored value, or any backend
/// error, yields `false` rather than an error.
#[must_use]
pub fn verify(candidate: &str, stored: &str) -> bool {
    match bcrypt::verify(truncate(candidate), stored) {
        Ok(matches) => matches,
        Err(err) => {
            error!("Password verification error: {err}");

            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // keep the work factor low in tests, DEFAULT_COST is deliberately slow
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify() {
        let hashed = hash_with_cost("mySecurePassword123", TEST_COST).unwrap();

        assert!(verify("mySecurePassword123", &hashed));
        assert!(!verify("wrongPassword", &hashed));
    }

    #[test]
    fn test_hash_is_salted() {
        let first = hash_with_cost("correct horse battery", TEST_COST).unwrap();
        let second = hash_with_cost("correct horse battery", TEST_COST).unwrap();

        assert_ne!(first, second);
        assert!(verify("correct horse battery", &first));
        assert!(verify("correct horse battery", &second));
    }

    #[test]
    fn test_hash_is_self_describing() {
        let hashed = hash_with_cost("mySecurePassword123", TEST_COST).unwrap();

        // modular-crypt format: $2<x>$<cost>$<salt+digest>
        assert!(hashed.starts_with("$2"));
        assert!(hashed.contains("$04$"));
    }

    #[test]
    fn test_truncation_beyond_72_bytes() {
        let secret = "a".repeat(80);
        let hashed = hash_with_cost(&secret, TEST_COST).unwrap();

        // only the first 72 bytes participate in the digest
        let mut tail_changed = "a".repeat(72);
        tail_changed.push_str("bbbbbbbb");
        assert!(verify(&tail_changed, &hashed));

        let mut head_changed = String::from("b");
        head_changed.push_str(&"a".repeat(79));
        assert!(!verify(&head_changed, &hashed));
    }

    #[test]
    fn test_truncation_may_split_multibyte_char() {
        // 71 ASCII bytes followed by a 3-byte char, the cut lands mid-char
        let mut secret = "a".repeat(71);
        secret.push('€');
        let hashed = hash_with_cost(&secret, TEST_COST).unwrap();

        assert!(verify(&secret, &hashed));
        assert!(!verify(&"a".repeat(71), &hashed));
    }

    #[test]
    fn test_verify_fails_closed_on_malformed_hash() {
        assert!(!verify("mySecurePassword123", ""));
        assert!(!verify("mySecurePassword123", "not-a-bcrypt-hash"));
        assert!(!verify(
            "mySecurePassword123",
            "$argon2id$v=19$m=65536,t=2,p=1$abcdef$abcdef"
        ));
    }
}
