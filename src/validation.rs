use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::domain::FieldType;

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyValue,
    InvalidFormat,
    NotPositiveNumber,
}

impl ValidationIssue {
    pub fn message(self) -> &'static str {
        match self {
            ValidationIssue::EmptyValue => "Text field cannot be empty",
            ValidationIssue::InvalidFormat => "Please enter a valid email address",
            ValidationIssue::NotPositiveNumber => "Number must be greater than 0",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationIssue {}

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("invalid email pattern")
});

static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("invalid decimal pattern")
});

/// Check a raw (untrimmed) value against the rule for `field_type`.
pub fn validate_field(field_type: FieldType, value: &str) -> Option<ValidationIssue> {
    let valid = match field_type {
        FieldType::Text => !value.is_empty(),
        FieldType::Email => is_email(value),
        FieldType::Number => parse_positive(value).is_some(),
    };
    if valid {
        None
    } else {
        Some(match field_type {
            FieldType::Text => ValidationIssue::EmptyValue,
            FieldType::Email => ValidationIssue::InvalidFormat,
            FieldType::Number => ValidationIssue::NotPositiveNumber,
        })
    }
}

/// Error text stored on a field, or `None` when the value passes.
pub fn error_message(field_type: FieldType, value: &str) -> Option<String> {
    validate_field(field_type, value).map(|issue| issue.message().to_string())
}

fn is_email(value: &str) -> bool {
    // the pattern cannot express these without lookaround
    if value.starts_with('.') || value.contains("..") {
        return false;
    }
    EMAIL_PATTERN.is_match(value)
}

fn parse_positive(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if !DECIMAL_PATTERN.is_match(trimmed) {
        return None;
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && *number > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rejects_only_zero_length() {
        assert_eq!(
            validate_field(FieldType::Text, ""),
            Some(ValidationIssue::EmptyValue)
        );
        assert_eq!(validate_field(FieldType::Text, "a"), None);
        // raw value is checked, whitespace counts as content
        assert_eq!(validate_field(FieldType::Text, "   "), None);
    }

    #[test]
    fn email_accepts_common_addresses() {
        for ok in ["user@example.com", "a@b.co", "first.last+tag@mail.example.org"] {
            assert_eq!(validate_field(FieldType::Email, ok), None, "{ok}");
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for bad in [
            "",
            "not-an-email",
            "user@localhost",
            "user @example.com",
            "user@exa mple.com",
            " user@example.com",
            ".user@example.com",
            "us..er@example.com",
            "user@@example.com",
            "@example.com",
        ] {
            assert_eq!(
                validate_field(FieldType::Email, bad),
                Some(ValidationIssue::InvalidFormat),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn number_requires_positive_decimal() {
        for ok in ["5", "3.5", " 42 ", "+1", ".5", "0.001", "7."] {
            assert_eq!(validate_field(FieldType::Number, ok), None, "{ok:?}");
        }
        for bad in [
            "", "0", "-3", "abc", "3abc", "1e3", "inf", "NaN", "-0.0", "0.000", "1 2",
        ] {
            assert_eq!(
                validate_field(FieldType::Number, bad),
                Some(ValidationIssue::NotPositiveNumber),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn huge_numbers_overflowing_to_infinity_are_rejected() {
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(
            validate_field(FieldType::Number, &huge),
            Some(ValidationIssue::NotPositiveNumber)
        );
    }

    #[test]
    fn messages_match_user_text() {
        assert_eq!(
            error_message(FieldType::Text, "").as_deref(),
            Some("Text field cannot be empty")
        );
        assert_eq!(
            error_message(FieldType::Email, "x").as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            error_message(FieldType::Number, "0").as_deref(),
            Some("Number must be greater than 0")
        );
    }

    #[test]
    fn validation_is_deterministic() {
        let samples = ["", " ", "a", "user@example.com", "-1", "2.5", "\u{0}", "ß@ü.de"];
        for kind in FieldType::ALL {
            for sample in samples {
                assert_eq!(validate_field(kind, sample), validate_field(kind, sample));
            }
        }
    }
}
