//! Editable fields of a vendor contact record

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// An editable field of [`VendorContactRecord`](crate::VendorContactRecord).
///
/// The server-assigned `id` is deliberately absent: the form never edits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    StoreName,
    OwnerName,
    Email,
    Phone,
    AlternatePhone,
    Address,
    City,
    State,
    ZipCode,
    StoreDescription,
}

impl ContactField {
    /// All editable fields in form order.
    pub const ALL: [ContactField; 10] = [
        ContactField::StoreName,
        ContactField::OwnerName,
        ContactField::Email,
        ContactField::Phone,
        ContactField::AlternatePhone,
        ContactField::Address,
        ContactField::City,
        ContactField::State,
        ContactField::ZipCode,
        ContactField::StoreDescription,
    ];

    /// Wire name of the field (camelCase, as used in JSON payloads).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::StoreName => "storeName",
            Self::OwnerName => "ownerName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::AlternatePhone => "alternatePhone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
            Self::StoreDescription => "storeDescription",
        }
    }

    /// Human-readable label shown next to the input.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::StoreName => "Store Name",
            Self::OwnerName => "Owner Name",
            Self::Email => "Email Address",
            Self::Phone => "Phone Number",
            Self::AlternatePhone => "Alternate Phone (Optional)",
            Self::Address => "Street Address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "ZIP Code",
            Self::StoreDescription => "Store Description",
        }
    }

    /// Whether the field must be non-blank on submit.
    #[must_use]
    pub fn is_required(self) -> bool {
        !matches!(self, Self::AlternatePhone | Self::StoreDescription)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContactField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| Error::unknown_field(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for field in ContactField::ALL {
            assert_eq!(field.name().parse::<ContactField>().unwrap(), field);
        }
    }

    #[test]
    fn rejects_id_and_unknown_names() {
        assert_eq!(
            "id".parse::<ContactField>(),
            Err(Error::unknown_field("id"))
        );
        assert!("StoreName".parse::<ContactField>().is_err());
    }

    #[test]
    fn optional_fields_are_not_required() {
        let optional: Vec<_> = ContactField::ALL
            .into_iter()
            .filter(|f| !f.is_required())
            .collect();
        assert_eq!(
            optional,
            vec![ContactField::AlternatePhone, ContactField::StoreDescription]
        );
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ContactField::ZipCode).unwrap();
        assert_eq!(json, "\"zipCode\"");
    }
}
