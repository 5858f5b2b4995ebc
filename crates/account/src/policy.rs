use std::borrow::Cow;

use validator::{ValidateLength, ValidationError, ValidationErrors};

/// Optional password policy checked before any plaintext is hashed.
///
/// Violations are reported as [`ValidationErrors`] so callers get the same
/// detail shape the `validator` crate produces for form input; the service
/// wraps them in [`AccountError::InvalidPassword`].
///
/// [`AccountError::InvalidPassword`]: crate::AccountError::InvalidPassword
pub trait PasswordPolicy: Send + Sync {
    fn validate_password(&self, plain: &str) -> Result<(), ValidationErrors>;
}

/// Length-bounds policy, 8..=128 characters by default.
#[derive(Debug, Clone, Copy)]
pub struct LengthPolicy {
    min: u64,
    max: u64,
}

impl LengthPolicy {
    pub fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

impl Default for LengthPolicy {
    fn default() -> Self {
        Self { min: 8, max: 128 }
    }
}

impl PasswordPolicy for LengthPolicy {
    fn validate_password(&self, plain: &str) -> Result<(), ValidationErrors> {
        if plain.validate_length(Some(self.min), Some(self.max), None) {
            return Ok(());
        }

        let mut error = ValidationError::new("length");
        error.add_param(Cow::from("min"), &self.min);
        error.add_param(Cow::from("max"), &self.max);

        let mut errors = ValidationErrors::new();
        errors.add("password", error);

        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_password_within_bounds() {
        assert!(LengthPolicy::default().validate_password("longenough").is_ok());
    }

    #[test]
    fn rejects_short_password_with_detail() {
        let errors = LengthPolicy::default()
            .validate_password("short")
            .unwrap_err();

        let field_errors = errors.field_errors();
        let violations = field_errors.get("password").unwrap();

        assert_eq!(violations[0].code, "length");
    }

    #[test]
    fn custom_bounds_apply() {
        let policy = LengthPolicy::new(4, 6);

        assert!(policy.validate_password("four").is_ok());
        assert!(policy.validate_password("toolong").is_err());
    }
}
