//! Input validation for forms and request bodies
//!
//! Everything sent to the API passes through [`Validate`] first, so a bad
//! value is reported per field instead of as a server-side 400/422.

use crate::error::ValidationErrors;

/// Minimum password length accepted by the login and registration forms
pub const PASSWORD_MIN_LEN: usize = 8;

/// Minimum display-name length at registration
pub const NAME_MIN_LEN: usize = 2;

/// Minimum passport number length at registration
pub const PASSPORT_MIN_LEN: usize = 6;

/// Field-level validation
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Report `required` when blank, otherwise check the character count
pub fn check_min_len(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    min: usize,
    label: &str,
) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    } else if value.chars().count() < min {
        errors.add(
            field,
            format!("{} must be at least {} characters", label, min),
        );
    }
}

/// Report `required` when blank
pub fn check_required(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
    }
}

/// Check an email address field
pub fn check_email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Email is required");
    } else if !is_email(value) {
        errors.add(field, "Invalid email");
    }
}

/// Structural email check: one `@`, a non-empty local part, and a dotted
/// domain whose labels are non-empty. No whitespace anywhere.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("admin@aerocast.com"));
        assert!(is_email("first.last+tag@mail.example.org"));

        assert!(!is_email(""));
        assert!(!is_email("no-at-sign"));
        assert!(!is_email("@aerocast.com"));
        assert!(!is_email("a@b"));
        assert!(!is_email("a@@b.com"));
        assert!(!is_email("a b@c.com"));
        assert!(!is_email("a@b..com"));
        assert!(!is_email("a@-b.com"));
    }

    #[test]
    fn test_check_min_len_messages() {
        let mut errors = ValidationErrors::new();
        check_min_len(&mut errors, "password", "", PASSWORD_MIN_LEN, "Password");
        check_min_len(&mut errors, "name", "X", NAME_MIN_LEN, "Name");
        check_min_len(&mut errors, "numero_passport", "AB123456", PASSPORT_MIN_LEN, "Passport number");

        assert_eq!(errors.message_for("password"), Some("Password is required"));
        assert_eq!(
            errors.message_for("name"),
            Some("Name must be at least 2 characters")
        );
        assert_eq!(errors.message_for("numero_passport"), None);
    }

    #[test]
    fn test_min_len_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        check_min_len(&mut errors, "name", "É", NAME_MIN_LEN, "Name");
        assert!(!errors.is_empty());

        let mut errors = ValidationErrors::new();
        check_min_len(&mut errors, "name", "Éa", NAME_MIN_LEN, "Name");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_check_email_messages() {
        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", "   ");
        assert_eq!(errors.message_for("email"), Some("Email is required"));

        let mut errors = ValidationErrors::new();
        check_email(&mut errors, "email", "nope");
        assert_eq!(errors.message_for("email"), Some("Invalid email"));
    }
}
