//! Password hashing with bcrypt

use crate::application::ports::PasswordHasher;
use crate::domain::{DomainError, DomainResult};

pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::Storage(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_plaintext_and_verifies() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(hasher.verify("s3cret", &hash));
        assert!(!hasher.verify("wrong", &hash));
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(!BcryptHasher::new(4).verify("x", "not-a-bcrypt-hash"));
    }
}
