#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vendor-validation
//!
//! Field-level validation rules for vendor contact records.
//!
//! Validation is a pure, total function: it never fails, it only reports
//! which fields are blank or malformed. An empty error set means the record
//! may be submitted.
//!
//! ## Example Usage
//!
//! ```rust
//! use vendor_model::{ContactField, sample_vendor};
//! use vendor_validation::validate;
//!
//! let mut record = sample_vendor();
//! record.set(ContactField::Phone, "(555) 123-4567");
//! assert!(validate(&record).is_empty());
//!
//! record.set(ContactField::Email, "   ");
//! let errors = validate(&record);
//! assert_eq!(errors.get(ContactField::Email), Some("Email is required"));
//! ```

pub mod engine;
pub mod errors;
pub mod rules;

// Re-export main types
pub use engine::ContactValidator;
pub use errors::ValidationErrorSet;
pub use rules::{
    FieldRule, is_blank, is_valid_email, is_valid_phone, is_valid_zip, rule_for,
    validate_field,
};

use vendor_model::VendorContactRecord;

/// Convenience function to validate a record with the default rule table
#[must_use]
pub fn validate(record: &VendorContactRecord) -> ValidationErrorSet {
    ContactValidator::new().validate(record)
}
