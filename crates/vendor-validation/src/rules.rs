//! Validation rules

use std::sync::LazyLock;

use regex::Regex;
use vendor_model::ContactField;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern compiles"));

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}$")
        .expect("phone pattern compiles")
});

static ZIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(-[0-9]{4})?$").expect("zip pattern compiles"));

/// Format check applied once a required field is non-blank
#[derive(Debug, Clone, Copy)]
pub struct FormatRule {
    /// Predicate over the raw (untrimmed) value
    pub check: fn(&str) -> bool,
    /// Message reported when the check fails
    pub message: &'static str,
}

/// Validation rule for one required field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: ContactField,
    /// Message reported when the trimmed value is empty
    pub required_message: &'static str,
    pub format: Option<FormatRule>,
}

impl FieldRule {
    const fn required(field: ContactField, required_message: &'static str) -> Self {
        Self {
            field,
            required_message,
            format: None,
        }
    }

    const fn with_format(mut self, check: fn(&str) -> bool, message: &'static str) -> Self {
        self.format = Some(FormatRule { check, message });
        self
    }

    /// Check a single value against this rule.
    ///
    /// Returns the error message, or `None` when the value passes.
    #[must_use]
    pub fn check(&self, value: &str) -> Option<&'static str> {
        if is_blank(value) {
            return Some(self.required_message);
        }
        match self.format {
            Some(format) if !(format.check)(value) => Some(format.message),
            _ => None,
        }
    }
}

/// Rule table in form order. Optional fields have no entry.
pub static RULES: [FieldRule; 8] = [
    FieldRule::required(ContactField::StoreName, "Store name is required"),
    FieldRule::required(ContactField::OwnerName, "Owner name is required"),
    FieldRule::required(ContactField::Email, "Email is required")
        .with_format(is_valid_email, "Invalid email format"),
    FieldRule::required(ContactField::Phone, "Phone number is required")
        .with_format(is_valid_phone, "Invalid phone number format"),
    FieldRule::required(ContactField::Address, "Address is required"),
    FieldRule::required(ContactField::City, "City is required"),
    FieldRule::required(ContactField::State, "State is required"),
    FieldRule::required(ContactField::ZipCode, "ZIP code is required")
        .with_format(is_valid_zip, "Invalid ZIP code format"),
];

/// Blank after stripping whitespace and byte-order marks
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
}

/// Look up the rule for a field, if the field is validated at all
#[must_use]
pub fn rule_for(field: ContactField) -> Option<&'static FieldRule> {
    RULES.iter().find(|rule| rule.field == field)
}

/// Validate a single field value.
///
/// Optional fields always pass.
#[must_use]
pub fn validate_field(field: ContactField, value: &str) -> Option<&'static str> {
    rule_for(field).and_then(|rule| rule.check(value))
}

/// `local@domain.tld`-shaped address
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Loose international phone number: optional `+`, optional parenthesized
/// area code, then digit groups separated by space, dot or hyphen
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value)
}

/// US ZIP code, `NNNNN` or `NNNNN-NNNN`
#[must_use]
pub fn is_valid_zip(value: &str) -> bool {
    ZIP_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table_covers_required_fields_only() {
        let fields: Vec<_> = RULES.iter().map(|rule| rule.field).collect();
        let required: Vec<_> = ContactField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .collect();
        assert_eq!(fields, required);
    }

    #[test]
    fn test_blank_is_reported_before_format() {
        assert_eq!(
            validate_field(ContactField::ZipCode, "  \t"),
            Some("ZIP code is required")
        );
        assert_eq!(
            validate_field(ContactField::ZipCode, "abc"),
            Some("Invalid ZIP code format")
        );
    }

    #[test]
    fn test_byte_order_mark_counts_as_blank() {
        assert_eq!(
            validate_field(ContactField::StoreName, "\u{FEFF}"),
            Some("Store name is required")
        );
        assert_eq!(
            validate_field(ContactField::City, " \u{FEFF}\t"),
            Some("City is required")
        );
        assert!(!is_blank("\u{FEFF}Springfield"));
    }

    #[test]
    fn test_optional_fields_always_pass() {
        assert_eq!(validate_field(ContactField::AlternatePhone, "not a phone"), None);
        assert_eq!(validate_field(ContactField::StoreDescription, ""), None);
    }

    #[test]
    fn test_email_pattern() {
        for ok in ["a@b.co", "alex@freshmarket.com", "first.last@mail.example.org"] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
        for bad in ["ab.co", "a@bco", "a @b.co", "@b.co", "a@.co", " a@b.co"] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_phone_pattern() {
        for ok in [
            "(555) 123-4567",
            "555-123-4567",
            "555.123.4567",
            "+15551234567",
            "+1 555 123 4567",
            "+44 20 7946 0958",
            "1234",
        ] {
            assert!(is_valid_phone(ok), "{ok} should be accepted");
        }
        for bad in ["12", "abc", "555 123 4567 ext", "+1 (555) 123-4567", "555--123"] {
            assert!(!is_valid_phone(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_zip_pattern() {
        assert!(is_valid_zip("62704"));
        assert!(is_valid_zip("62704-1234"));
        for bad in [
            "6270",
            "627041",
            "62704-123",
            " 62704",
            "62704 ",
            "ABCDE",
            "\u{0666}\u{0662}\u{0667}\u{0660}\u{0664}",
            "\u{FF16}\u{FF12}\u{FF17}\u{FF10}\u{FF14}",
            "62704-\u{0661}\u{0662}\u{0663}\u{0664}",
        ] {
            assert!(!is_valid_zip(bad), "{bad} should be rejected");
        }
    }
}
