//! Gateway error types with context

use thiserror::Error;

/// Errors raised by a [`DataGateway`](crate::DataGateway)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Loading the vendor failed
    #[error("Failed to fetch vendor '{vendor_id}': {message}")]
    Fetch { vendor_id: String, message: String },

    /// Persisting the vendor failed
    #[error("Failed to save vendor '{vendor_id}': {message}")]
    Save { vendor_id: String, message: String },

    /// No record exists for the vendor
    #[error("Vendor '{vendor_id}' not found")]
    NotFound { vendor_id: String },

    /// Store file could not be read or written
    #[error("IO error for '{path}': {message}")]
    Io { path: String, message: String },

    /// Store file contents are not a valid vendor store
    #[error("Malformed vendor store '{path}': {message}")]
    Format { path: String, message: String },
}

impl GatewayError {
    /// Create a fetch error
    pub fn fetch(vendor_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            vendor_id: vendor_id.into(),
            message: message.into(),
        }
    }

    /// Create a save error
    pub fn save(vendor_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Save {
            vendor_id: vendor_id.into(),
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(vendor_id: impl Into<String>) -> Self {
        Self::NotFound {
            vendor_id: vendor_id.into(),
        }
    }

    /// Create an I/O error with path context
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a store format error with path context
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether the error came from loading a vendor
    #[must_use]
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::NotFound { .. })
    }

    /// Whether the error came from persisting a vendor
    #[must_use]
    pub fn is_save(&self) -> bool {
        matches!(self, Self::Save { .. })
    }
}

/// Crate-local result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
