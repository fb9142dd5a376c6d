//! Gateway configuration

use std::time::Duration;

/// Vendor loaded when the caller does not name one
pub const DEFAULT_VENDOR_ID: &str = "v123456";

/// Behavior shared by gateway backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Vendor used by `fetch_vendor(None)`
    pub vendor_id: String,
    /// Simulated latency before a fetch resolves
    pub fetch_delay: Duration,
    /// Simulated latency before a save resolves
    pub save_delay: Duration,
}

impl GatewayConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration without any simulated latency
    pub fn instant() -> Self {
        Self {
            fetch_delay: Duration::ZERO,
            save_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the default vendor
    #[must_use]
    pub fn vendor_id(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = vendor_id.into();
        self
    }

    /// Set fetch latency
    #[must_use]
    pub fn fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Set save latency
    #[must_use]
    pub fn save_delay(mut self, delay: Duration) -> Self {
        self.save_delay = delay;
        self
    }

    /// Resolve an optional caller-supplied vendor id against the default
    pub fn resolve_vendor<'a>(&'a self, vendor_id: Option<&'a str>) -> &'a str {
        vendor_id.unwrap_or(&self.vendor_id)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID.to_string(),
            fetch_delay: Duration::from_millis(800),
            save_delay: Duration::from_millis(1500),
        }
    }
}
