/**
 * Password Hashing
 *
 * bcrypt hashing and verification of user passwords. Every hash embeds its
 * own random salt and cost, so hashing the same password twice yields
 * different strings that both verify.
 */

use bcrypt::{hash, verify, BcryptError};

/// bcrypt hasher with a fixed work factor
pub struct PasswordHasher {
    cost: u32,
    /// Hash of a throwaway password, verified against when the real hash is
    /// unavailable so both paths cost the same
    dummy_hash: String,
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost (4..=31)
    pub fn new(cost: u32) -> Result<Self, BcryptError> {
        let dummy_hash = hash("blogd-timing-equalizer", cost)?;
        Ok(Self { cost, dummy_hash })
    }

    /// Work factor used for new hashes
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password with a fresh salt
    pub fn hash(&self, plaintext: &str) -> Result<String, BcryptError> {
        hash(plaintext, self.cost)
    }

    /// Check a plaintext password against a stored hash
    ///
    /// A malformed hash verifies as `false`.
    pub fn verify(&self, plaintext: &str, hash_string: &str) -> bool {
        match verify(plaintext, hash_string) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }

    /// Spend the same time as [`verify`](Self::verify) without a real hash
    pub fn verify_dummy(&self, plaintext: &str) {
        let _ = verify(plaintext, &self.dummy_hash);
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").field("cost", &self.cost).finish()
    }
}
