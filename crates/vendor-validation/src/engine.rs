//! Validation engine

use tracing::debug;
use vendor_model::VendorContactRecord;

use crate::errors::ValidationErrorSet;
use crate::rules::{FieldRule, RULES};

/// Applies the field rule table to whole records
#[derive(Debug, Clone)]
pub struct ContactValidator {
    rules: &'static [FieldRule],
}

impl ContactValidator {
    /// Create a validator with the standard contact form rules
    #[must_use]
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Rules applied by this validator, in form order
    #[must_use]
    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    /// Validate a complete record.
    ///
    /// Never fails; returns an empty set when every required field is
    /// present and well-formed.
    #[must_use]
    pub fn validate(&self, record: &VendorContactRecord) -> ValidationErrorSet {
        let errors: ValidationErrorSet = self
            .rules
            .iter()
            .filter_map(|rule| {
                rule.check(record.get(rule.field))
                    .map(|message| (rule.field, message.to_string()))
            })
            .collect();

        debug!(
            vendor_id = %record.id,
            error_count = errors.len(),
            "validated contact record"
        );
        errors
    }
}

impl Default for ContactValidator {
    fn default() -> Self {
        Self::new()
    }
}
