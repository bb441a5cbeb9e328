//! Password hashing for seeded accounts.

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use rand::RngCore;

use crate::error::{MigrateResult, MigrationError};

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh salt.
    fn hash(&self, password: &str) -> MigrateResult<String>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> MigrateResult<bool>;
}

/// Argon2id with the crate's default cost parameters.
///
/// Output is a PHC string (`$argon2id$v=19$...`) carrying its own salt and
/// parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    /// Creates a new Argon2 password hasher.
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> MigrateResult<String> {
        let mut salt_bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut salt_bytes);

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| MigrationError::PasswordHash(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| MigrationError::PasswordHash(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> MigrateResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| MigrationError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_against_plaintext() {
        let hasher = Argon2Hasher::new();
        let hash = hasher.hash("password123").unwrap();

        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("password123", &hash).unwrap());
        assert!(!hasher.verify("password124", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_hashes() {
        let hasher = Argon2Hasher::new();
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password123", &second).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        let hasher = Argon2Hasher::new();
        let err = hasher.verify("password123", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, MigrationError::PasswordHash(_)));
    }
}
