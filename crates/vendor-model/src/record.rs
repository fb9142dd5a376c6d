//! Vendor contact record
#![allow(clippy::must_use_candidate)] // Accessor API intentionally omits pervasive #[must_use].

use serde::{Deserialize, Serialize};

use crate::ContactField;

/// Store contact/profile information for one vendor.
///
/// All fields are free text at rest; they are only checked when the form is
/// submitted. Missing keys deserialize to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VendorContactRecord {
    /// Server-assigned identifier, never edited by the form
    pub id: String,
    pub store_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    /// Optional, empty when absent
    pub alternate_phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Optional, empty when absent
    pub store_description: String,
}

impl VendorContactRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record carrying a server identifier
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Current value of an editable field
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::StoreName => &self.store_name,
            ContactField::OwnerName => &self.owner_name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::AlternatePhone => &self.alternate_phone,
            ContactField::Address => &self.address,
            ContactField::City => &self.city,
            ContactField::State => &self.state,
            ContactField::ZipCode => &self.zip_code,
            ContactField::StoreDescription => &self.store_description,
        }
    }

    /// Replace the value of an editable field
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::StoreName => &mut self.store_name,
            ContactField::OwnerName => &mut self.owner_name,
            ContactField::Email => &mut self.email,
            ContactField::Phone => &mut self.phone,
            ContactField::AlternatePhone => &mut self.alternate_phone,
            ContactField::Address => &mut self.address,
            ContactField::City => &mut self.city,
            ContactField::State => &mut self.state,
            ContactField::ZipCode => &mut self.zip_code,
            ContactField::StoreDescription => &mut self.store_description,
        };
        *slot = value.into();
    }

    /// Builder form of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Single-line postal address used in the profile summary.
    ///
    /// Renders as `"{address}, {city}, {state} {zipCode}"`.
    pub fn address_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    /// Iterate `(field, value)` pairs in form order
    pub fn fields(&self) -> impl Iterator<Item = (ContactField, &str)> + '_ {
        ContactField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

/// Demo vendor used to seed local stores and the in-memory gateway.
pub fn sample_vendor() -> VendorContactRecord {
    VendorContactRecord {
        id: "v123456".to_string(),
        store_name: "Fresh Market Grocery".to_string(),
        owner_name: "Alex Johnson".to_string(),
        email: "alex@freshmarket.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        alternate_phone: "+1 (555) 987-6543".to_string(),
        address: "123 Main Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62704".to_string(),
        store_description:
            "Your friendly neighborhood grocery store with fresh produce and essential items."
                .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_cover_every_field() {
        let mut record = VendorContactRecord::new();
        for field in ContactField::ALL {
            record.set(field, field.label());
        }
        for (field, value) in record.fields() {
            assert_eq!(value, field.label());
        }
        assert!(record.id.is_empty());
    }

    #[test]
    fn address_line_matches_profile_summary() {
        assert_eq!(
            sample_vendor().address_line(),
            "123 Main Street, Springfield, IL 62704"
        );
    }

    #[test]
    fn deserializes_camel_case_with_missing_optional_fields() {
        let record: VendorContactRecord = serde_json::from_str(
            r#"{"id":"v9","storeName":"Shop","zipCode":"62704","profileImage":null}"#,
        )
        .unwrap();
        assert_eq!(record.id, "v9");
        assert_eq!(record.store_name, "Shop");
        assert_eq!(record.zip_code, "62704");
        assert_eq!(record.alternate_phone, "");
        assert_eq!(record.store_description, "");
    }

    #[test]
    fn serializes_with_wire_names() {
        let value = serde_json::to_value(sample_vendor()).unwrap();
        assert_eq!(value["storeName"], "Fresh Market Grocery");
        assert_eq!(value["zipCode"], "62704");
        assert_eq!(value["alternatePhone"], "+1 (555) 987-6543");
    }
}
