#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vendor-model
//!
//! Vendor contact record and field catalogue.
//!
//! The record is the single editable entity of the contact form. Every field
//! is a plain string; optional fields use the empty string for "absent" so the
//! record shape never varies.
//!
//! ## Example Usage
//!
//! ```rust
//! use vendor_model::{ContactField, VendorContactRecord};
//!
//! let mut record = VendorContactRecord::with_id("v1");
//! record.set(ContactField::StoreName, "Corner Shop");
//! assert_eq!(record.get(ContactField::StoreName), "Corner Shop");
//! ```

/// Field catalogue: names, labels and requiredness.
pub mod field;
/// The vendor contact record itself.
pub mod record;

pub use field::ContactField;
pub use record::{VendorContactRecord, sample_vendor};

use thiserror::Error;

/// Errors that can occur when working with vendor records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown contact field '{name}'")]
    UnknownField { name: String },
}

impl Error {
    /// Build an unknown-field error for the given input name.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}

/// Crate-local result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
