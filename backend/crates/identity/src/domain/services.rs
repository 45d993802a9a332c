//! Credential Codec
//!
//! Hashes and verifies passwords with the application-wide pepper.

use crate::domain::value_object::credential::{CredentialHash, RawPassword};
use crate::error::IdentityResult;

#[derive(Clone, Default)]
pub struct CredentialCodec {
    pepper: Option<Vec<u8>>,
}

impl CredentialCodec {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            pepper: pepper.filter(|p| !p.is_empty()),
        }
    }

    pub fn hash(&self, password: &RawPassword) -> IdentityResult<CredentialHash> {
        let hashed = password.as_clear_text().hash(self.pepper.as_deref())?;
        Ok(CredentialHash::from_hashed(hashed))
    }

    /// `false` for a mismatch, an empty hash, or a hash that does not parse
    pub fn verify(&self, password: &RawPassword, stored: &CredentialHash) -> bool {
        stored
            .to_hashed()
            .is_some_and(|hashed| hashed.verify(password.as_clear_text(), self.pepper.as_deref()))
    }
}

impl std::fmt::Debug for CredentialCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCodec")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(s: &str) -> RawPassword {
        RawPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let codec = CredentialCodec::default();
        let hash = codec.hash(&raw("secret")).unwrap();

        assert!(!hash.is_empty());
        assert_ne!(hash.as_db_str(), "secret");
        assert!(codec.verify(&raw("secret"), &hash));
        assert!(!codec.verify(&raw("Secret"), &hash));
    }

    #[test]
    fn test_salted() {
        let codec = CredentialCodec::default();
        assert_ne!(codec.hash(&raw("secret")).unwrap(), codec.hash(&raw("secret")).unwrap());
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = CredentialCodec::new(Some(b"pepper".to_vec()));
        let hash = peppered.hash(&raw("secret")).unwrap();

        assert!(peppered.verify(&raw("secret"), &hash));
        assert!(!CredentialCodec::default().verify(&raw("secret"), &hash));
    }

    #[test]
    fn test_verify_never_matches_unusable_hash() {
        let codec = CredentialCodec::default();
        assert!(!codec.verify(&raw("secret"), &CredentialHash::empty()));
        assert!(!codec.verify(&raw("secret"), &CredentialHash::from_db("garbage")));
    }
}
