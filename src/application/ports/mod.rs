//! Outbound ports the application layer depends on

/// One-way password hashing.
///
/// Implemented by `infrastructure::crypto::password::BcryptHasher`.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> crate::domain::DomainResult<String>;

    /// `false` for a wrong password and for an unreadable hash alike.
    fn verify(&self, password: &str, hash: &str) -> bool;
}
