//! Field validators

use super::values::FormValues;
use regex::Regex;
use std::sync::OnceLock;

/// Default message reported by [`EmailValidator`]
pub const INVALID_EMAIL_MESSAGE: &str = "Not a valid email address";

/// A pure check of one field value.
///
/// `values` is a snapshot of the whole form, so cross-field rules can look at
/// sibling fields. Returns the message to show next to the field on failure.
pub trait Validator {
    fn validate(&self, value: &str, values: &FormValues) -> Result<(), String>;
}

impl<F> Validator for F
where
    F: Fn(&str, &FormValues) -> Result<(), String>,
{
    fn validate(&self, value: &str, values: &FormValues) -> Result<(), String> {
        self(value, values)
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Syntactic email check. Empty input passes so optional rows never block
/// submission.
#[derive(Debug, Clone)]
pub struct EmailValidator {
    message: String,
}

impl EmailValidator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn is_valid(value: &str) -> bool {
        value.is_empty() || email_regex().is_match(value)
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new(INVALID_EMAIL_MESSAGE)
    }
}

impl Validator for EmailValidator {
    fn validate(&self, value: &str, _values: &FormValues) -> Result<(), String> {
        if Self::is_valid(value) {
            Ok(())
        } else {
            Err(self.message.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(value: &str) -> Result<(), String> {
        EmailValidator::default().validate(value, &FormValues::default())
    }

    #[test]
    fn test_empty_string_passes() {
        assert!(check("").is_ok());
    }

    #[test]
    fn test_valid_addresses_pass() {
        for value in ["a@b.com", "x@y.com", "first.last+tag@mail.example.org"] {
            assert!(check(value).is_ok(), "{value} should pass");
        }
    }

    #[test]
    fn test_invalid_addresses_fail_with_message() {
        for value in ["a@b", "not-an-email", "@b.com", "a b@c.com", " ", "a@@b.com"] {
            assert_eq!(check(value), Err(INVALID_EMAIL_MESSAGE.to_string()), "{value:?}");
        }
    }

    #[test]
    fn test_custom_message() {
        let validator = EmailValidator::new("Bad address");
        assert_eq!(
            validator.validate("nope", &FormValues::default()),
            Err("Bad address".to_string())
        );
    }

    #[test]
    fn test_closures_are_validators() {
        let required = |value: &str, _: &FormValues| {
            if value.is_empty() {
                Err("Required".to_string())
            } else {
                Ok(())
            }
        };
        assert!(required.validate("x", &FormValues::default()).is_ok());
        assert!(required.validate("", &FormValues::default()).is_err());
    }
}
