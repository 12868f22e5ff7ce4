//! Field-level validation for the registration form.
//!
//! Validation is a pure function of the draft: the same draft always yields the
//! same errors, and nothing is mutated. Each field's rule is evaluated
//! independently, so a mismatch on the confirmation field is reported even
//! when the password itself is invalid.

use super::models::{Field, RegistrationDraft};
use std::collections::BTreeMap;
use std::fmt;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The kind of rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidFormat,
    TooShort,
    WeakComposition,
    Mismatch,
}

impl FieldError {
    /// Human-readable message for this error on the given field.
    pub fn message(self, field: Field) -> &'static str {
        match (self, field) {
            (FieldError::Required, Field::Name) => "Name is required",
            (FieldError::Required, Field::Email) => "Email is required",
            (FieldError::Required, Field::Password) => "Password is required",
            (FieldError::Required, Field::ConfirmPassword) => "Confirm Password is required",
            (FieldError::InvalidFormat, _) => "Invalid email",
            (FieldError::TooShort, _) => "Password should be at least 8 characters",
            (FieldError::WeakComposition, _) => {
                "Password must contain an uppercase letter, a lowercase letter, and a number"
            }
            (FieldError::Mismatch, _) => "Passwords must match",
        }
    }
}

/// Errors keyed by field. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.get(field).map(|error| error.message(field))
    }

    /// The message to surface for `field`, gated on whether it has been touched.
    pub fn visible(&self, field: Field, touched: bool) -> Option<&'static str> {
        if touched { self.message(field) } else { None }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.iter().map(|(field, error)| error.message(field)).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Validates a registration draft.
///
/// # Examples
///
/// ```
/// use edubridge::domain::{validate, Field, FieldError, RegistrationDraft};
///
/// let draft = RegistrationDraft {
///     name: String::new(),
///     email: "a@b.com".to_string(),
///     password: "Abcdef12".to_string(),
///     confirm_password: "Abcdef12".to_string(),
/// };
/// let errors = validate(&draft);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.get(Field::Name), Some(FieldError::Required));
/// ```
pub fn validate(draft: &RegistrationDraft) -> FieldErrors {
    let mut errors = BTreeMap::new();

    for field in Field::ALL {
        if let Some(error) = validate_field(draft, field) {
            errors.insert(field, error);
        }
    }

    FieldErrors(errors)
}

/// Validates a single field against the whole draft.
pub fn validate_field(draft: &RegistrationDraft, field: Field) -> Option<FieldError> {
    let value = draft.get(field);
    match field {
        Field::Name => value.trim().is_empty().then_some(FieldError::Required),
        Field::Email => {
            if value.is_empty() {
                Some(FieldError::Required)
            } else if !is_email_shaped(value) {
                Some(FieldError::InvalidFormat)
            } else {
                None
            }
        }
        Field::Password => {
            if value.is_empty() {
                Some(FieldError::Required)
            } else if value.chars().count() < MIN_PASSWORD_LENGTH {
                Some(FieldError::TooShort)
            } else if !has_required_composition(value) {
                Some(FieldError::WeakComposition)
            } else {
                None
            }
        }
        Field::ConfirmPassword => {
            if value.is_empty() {
                Some(FieldError::Required)
            } else if value != draft.password {
                Some(FieldError::Mismatch)
            } else {
                None
            }
        }
    }
}

/// A draft may be submitted when no field carries an error and none is empty.
pub fn is_submit_eligible(draft: &RegistrationDraft, errors: &FieldErrors) -> bool {
    errors.is_empty() && Field::ALL.iter().all(|field| !draft.get(*field).trim().is_empty())
}

/// ASCII classes only: `[a-z]`, `[A-Z]` and `[0-9]`.
fn has_required_composition(password: &str) -> bool {
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    has_lower && has_upper && has_digit
}

/// Single `@`, non-empty local part, dotted domain with no empty labels.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    if local.is_empty() || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}
