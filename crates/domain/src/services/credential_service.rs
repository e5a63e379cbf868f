use crate::errors::DomainError;

/// One-way password hashing with a fresh random salt per call (bcrypt).
#[derive(Debug, Clone)]
pub struct CredentialService {
    cost: u32,
}

impl CredentialService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// A malformed hash verifies as false rather than failing.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }
}

impl Default for CredentialService {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
