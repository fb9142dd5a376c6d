//! Field-level validation results

use std::collections::BTreeMap;

use serde::Serialize;
use vendor_model::ContactField;

/// Mapping from field to the human-readable message for that field.
///
/// A field absent from the set is valid. Entries iterate in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrorSet {
    errors: BTreeMap<ContactField, String>,
}

impl ValidationErrorSet {
    /// Create an empty (valid) set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no field has an error
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of fields with an error
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for a field, if it has one
    #[must_use]
    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Whether a field has an error
    #[must_use]
    pub fn contains(&self, field: ContactField) -> bool {
        self.errors.contains_key(&field)
    }

    /// Record an error, replacing any previous message for the field
    pub fn insert(&mut self, field: ContactField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Drop the error for a field. Returns whether one was present.
    pub fn clear_field(&mut self, field: ContactField) -> bool {
        self.errors.remove(&field).is_some()
    }

    /// Drop every error
    pub fn clear(&mut self) {
        self.errors.clear();
    }

    /// Iterate `(field, message)` pairs in form order
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> + '_ {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    /// Fields that currently have an error
    pub fn fields(&self) -> impl Iterator<Item = ContactField> + '_ {
        self.errors.keys().copied()
    }
}

impl FromIterator<(ContactField, String)> for ValidationErrorSet {
    fn from_iter<I: IntoIterator<Item = (ContactField, String)>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}
