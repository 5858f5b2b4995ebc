use argon2::{
    Argon2, Params,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AccountError, AccountResult};

/// One-way hash + verify contract consumed by the account service.
///
/// The service never inspects the hash; it only moves it between the
/// encoder and the store.
pub trait PasswordEncoder: Send + Sync {
    fn encode(&self, plain: &str) -> AccountResult<String>;

    fn matches(&self, plain: &str, hash: &str) -> AccountResult<bool>;
}

/// Hash a password using Argon2id with OWASP-recommended parameters
/// - Memory: 65536 KB (64 MB)
/// - Iterations: 3
/// - Parallelism: 4
pub fn hash_password(password: &str) -> AccountResult<String> {
    let params =
        Params::new(65536, 3, 4, None).map_err(|e| AccountError::Hashing(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AccountError::Hashing(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against an Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> AccountResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AccountError::Hashing(e.to_string()))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(_) => Ok(false),
    }
}

/// Default encoder backed by [`hash_password`] / [`verify_password`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Encoder;

impl PasswordEncoder for Argon2Encoder {
    fn encode(&self, plain: &str) -> AccountResult<String> {
        hash_password(plain)
    }

    fn matches(&self, plain: &str, hash: &str) -> AccountResult<bool> {
        verify_password(plain, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_plaintext_and_verifies() {
        let hash = hash_password("Secr3t!pass").unwrap();

        assert_ne!(hash, "Secr3t!pass");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("Secr3t!pass", &hash).unwrap());
        assert!(!verify_password("wrong-pass", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per call.
        let a = hash_password("Secr3t!pass").unwrap();
        let b = hash_password("Secr3t!pass").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(matches!(
            verify_password("whatever", "not-a-phc-string"),
            Err(AccountError::Hashing(_))
        ));
    }

    #[test]
    fn encoder_roundtrip() {
        let encoder = Argon2Encoder;
        let hash = encoder.encode("Secr3t!pass").unwrap();

        assert!(encoder.matches("Secr3t!pass", &hash).unwrap());
        assert!(!encoder.matches("other", &hash).unwrap());
    }
}
