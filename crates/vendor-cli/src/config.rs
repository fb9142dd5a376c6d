//! CLI configuration file

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use vendor_form::FormConfig;
use vendor_gateway::GatewayConfig;
use vendor_gateway::config::DEFAULT_VENDOR_ID;

/// Settings read from `--config <file.yaml>`; every key is optional
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub vendor_id: String,
    /// Vendor store file
    pub store: PathBuf,
    pub fetch_delay_ms: u64,
    pub save_delay_ms: u64,
    pub auto_hide_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            vendor_id: DEFAULT_VENDOR_ID.to_string(),
            store: PathBuf::from("vendors.json"),
            fetch_delay_ms: 0,
            save_delay_ms: 0,
            auto_hide_ms: 6000,
        }
    }
}

impl AppConfig {
    /// Load the config file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_overrides(mut self, store: Option<PathBuf>, vendor_id: Option<String>) -> Self {
        if let Some(store) = store {
            self.store = store;
        }
        if let Some(vendor_id) = vendor_id {
            self.vendor_id = vendor_id;
        }
        self
    }

    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig::new()
            .vendor_id(&self.vendor_id)
            .fetch_delay(Duration::from_millis(self.fetch_delay_ms))
            .save_delay(Duration::from_millis(self.save_delay_ms))
    }

    pub fn form(&self) -> FormConfig {
        FormConfig::new()
            .vendor_id(&self.vendor_id)
            .auto_hide(Duration::from_millis(self.auto_hide_ms))
    }
}
