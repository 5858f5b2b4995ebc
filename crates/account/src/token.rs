use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha3::{Digest, Sha3_256};

/// Produces unpredictable password-reset tokens.
///
/// The seed is a stable per-account salt (the service passes the account
/// email); unpredictability must come from the generator itself, not the
/// seed.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self, seed: &str) -> String;
}

/// Default generator: SHA3-256 over the seed plus 32 bytes of OS entropy,
/// URL-safe base64 encoded (43 characters, safe to embed in a reset link).
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self, seed: &str) -> String {
        let noise: [u8; 32] = rand::random();

        let mut hasher = Sha3_256::new();
        hasher.update(seed.as_bytes());
        hasher.update(noise);

        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_per_call() {
        let tokens = RandomTokenGenerator;

        let a = tokens.generate("a@example.com");
        let b = tokens.generate("a@example.com");

        assert_ne!(a, b);
    }

    #[test]
    fn token_is_url_safe() {
        let token = RandomTokenGenerator.generate("a@example.com");

        // 32-byte digest, base64url without padding
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
