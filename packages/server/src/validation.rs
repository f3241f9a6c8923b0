//! Lead contact validation and normalization.
//!
//! Lead forms arrive with contact details in many shapes:
//! - Phones with punctuation: `"(214) 555-0147"`, `"214.555.0147"`
//! - Phones with a country prefix: `"+1 214 555 0147"`
//! - Emails with stray whitespace and mixed case
//!
//! This module normalizes these into a canonical form before a lead is
//! accepted, and rejects input that cannot reach a real person.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Regex for a plausible email address (local@domain.tld).
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("valid regex")
});

/// Regex matching every non-digit character.
static NON_DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("valid regex"));

/// A lead's contact details failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactValidationError {
    /// The name field was empty.
    #[error("name is required")]
    MissingName,

    /// The email address is not plausible.
    #[error("email address '{email}' is not valid")]
    InvalidEmail {
        /// The rejected input.
        email: String,
    },

    /// The phone number does not contain a US 10-digit number.
    #[error("phone number '{phone}' is not a valid US number")]
    InvalidPhone {
        /// The rejected input.
        phone: String,
    },
}

/// Canonicalized contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContact {
    /// Trimmed full name.
    pub name: String,
    /// Lowercased email address.
    pub email: String,
    /// Bare 10-digit phone number.
    pub phone: String,
}

/// Validates and normalizes lead contact details.
///
/// # Errors
///
/// Returns [`ContactValidationError`] naming the first offending field
/// (checked in order: name, email, phone).
pub fn validate_contact(
    name: &str,
    email: &str,
    phone: &str,
) -> Result<NormalizedContact, ContactValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ContactValidationError::MissingName);
    }

    let email_norm = email.trim().to_lowercase();
    if !EMAIL_RE.is_match(&email_norm) {
        return Err(ContactValidationError::InvalidEmail {
            email: email.to_string(),
        });
    }

    let digits = NON_DIGIT_RE.replace_all(phone, "").to_string();
    // Accept an optional leading country code 1.
    let digits = digits
        .strip_prefix('1')
        .filter(|rest| rest.len() == 10)
        .map_or(digits.clone(), ToString::to_string);
    if digits.len() != 10 {
        return Err(ContactValidationError::InvalidPhone {
            phone: phone.to_string(),
        });
    }

    Ok(NormalizedContact {
        name: name.to_string(),
        email: email_norm,
        phone: digits,
    })
}
