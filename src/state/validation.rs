//! Field validation rules
//!
//! A field is checked in a fixed order: the required check first, then the
//! format check for its kind. Format checks only run on non-empty values, so
//! an empty optional field is always valid.

use super::forms::{FieldKind, FormField};
use regex::Regex;
use std::sync::LazyLock;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

/// Optional `+91-`, `+91` or `0` prefix followed by exactly ten digits
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+91-|\+91|0)?[0-9]{10}$").expect("phone regex is valid"));

/// Outcome of validating a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// The reason shown to the user, if invalid
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Validate one field: required → email shape → phone shape
pub fn validate_field(field: &FormField) -> ValidationResult {
    let has_content = !field.value.trim().is_empty();

    if field.required && !has_content {
        return ValidationResult::Invalid(REQUIRED_MESSAGE.to_string());
    }

    if has_content {
        match field.kind {
            FieldKind::Email if !is_valid_email(&field.value) => {
                return ValidationResult::Invalid(EMAIL_MESSAGE.to_string());
            }
            FieldKind::Tel if !is_valid_phone(&field.value) => {
                return ValidationResult::Invalid(PHONE_MESSAGE.to_string());
            }
            _ => {}
        }
    }

    ValidationResult::Valid
}
