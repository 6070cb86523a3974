//! Client-side gate run before every submission attempt.

use std::sync::LazyLock;

use regex::Regex;

use super::state::{FieldErrors, FormField, FormInput};

pub const SUBJECT_MIN_CHARS: usize = 5;
pub const SUBJECT_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 5000;

// local@domain.tld with no whitespace or extra `@` in any run.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex must compile")
});

/// Check every field and collect all failures; never short-circuits.
pub fn validate_form(input: &FormInput) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if let Some(message) = check_length(
        "Subject",
        &input.subject,
        SUBJECT_MIN_CHARS,
        SUBJECT_MAX_CHARS,
    ) {
        errors.set(FormField::Subject, message);
    }
    if let Some(message) = check_length(
        "Description",
        &input.description,
        DESCRIPTION_MIN_CHARS,
        DESCRIPTION_MAX_CHARS,
    ) {
        errors.set(FormField::Description, message);
    }
    if let Some(message) = check_email(&input.email) {
        errors.set(FormField::Email, message);
    }
    errors
}

fn check_length(label: &str, value: &str, min: usize, max: usize) -> Option<String> {
    let chars = value.trim().chars().count();
    if chars == 0 {
        Some(format!("{label} is required."))
    } else if chars < min {
        Some(format!("{label} must be at least {min} characters."))
    } else if chars > max {
        Some(format!("{label} must be at most {max} characters."))
    } else {
        None
    }
}

fn check_email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Email is required.".to_string())
    } else if !is_valid_email(value) {
        Some("Enter a valid email address.".to_string())
    } else {
        None
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(subject: &str, description: &str, email: &str) -> FormInput {
        FormInput {
            subject: subject.to_string(),
            description: description.to_string(),
            email: email.to_string(),
            priority: String::new(),
        }
    }

    #[test]
    fn accepts_complete_form() {
        let errors = validate_form(&input("Crash", "Crashes on save", "a@b.co"));
        assert!(errors.is_empty());
    }

    #[test]
    fn short_subjects_fail_after_trimming() {
        for subject in ["", "    ", "abcd", "  abcd  ", "ab\u{e9}d"] {
            let errors = validate_form(&input(subject, "long enough text", "a@b.co"));
            assert!(errors.get(FormField::Subject).is_some(), "{subject:?}");
            assert_eq!(errors.len(), 1);
        }
        let errors = validate_form(&input("  abcde ", "long enough text", "a@b.co"));
        assert!(errors.is_empty());
    }

    #[test]
    fn short_descriptions_fail_after_trimming() {
        let errors = validate_form(&input("Crash", "  123456789  ", "a@b.co"));
        assert_eq!(
            errors.get(FormField::Description),
            Some("Description must be at least 10 characters.")
        );
        let errors = validate_form(&input("Crash", "1234567890", "a@b.co"));
        assert!(errors.is_empty());
    }

    #[test]
    fn over_long_fields_fail() {
        let errors = validate_form(&input(
            &"s".repeat(SUBJECT_MAX_CHARS + 1),
            &"d".repeat(DESCRIPTION_MAX_CHARS + 1),
            "a@b.co",
        ));
        assert_eq!(
            errors.get(FormField::Subject),
            Some("Subject must be at most 200 characters.")
        );
        assert_eq!(
            errors.get(FormField::Description),
            Some("Description must be at most 5000 characters.")
        );
    }

    #[test]
    fn email_shape_rule() {
        for email in ["a@b.c", "first.last@sub.example.org", "  x@y.z  "] {
            assert!(is_valid_email(email), "{email:?}");
        }
        for email in ["", "plain", "a@b", "@b.c", "a@.c", "a@b.", "a b@c.d", "a@@b.c", "a@b@c.d"] {
            assert!(!is_valid_email(email), "{email:?}");
        }
    }

    #[test]
    fn reports_every_failing_field_at_once() {
        let errors = validate_form(&input("abc", "short", "nope"));
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(FormField::Subject), Some("Subject must be at least 5 characters."));
        assert_eq!(errors.get(FormField::Email), Some("Enter a valid email address."));

        let errors = validate_form(&input("", "", ""));
        assert_eq!(errors.get(FormField::Email), Some("Email is required."));
        assert_eq!(errors.get(FormField::Subject), Some("Subject is required."));
    }
}
