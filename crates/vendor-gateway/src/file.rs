//! JSON file-backed gateway

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};
use vendor_model::VendorContactRecord;

use crate::{DataGateway, GatewayConfig, GatewayError, Result};

/// On-disk layout of the vendor store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorStore {
    #[serde(default)]
    pub vendors: BTreeMap<String, StoredVendor>,
}

/// One persisted vendor with its last write time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVendor {
    pub record: VendorContactRecord,
    pub updated_at: DateTime<Utc>,
}

/// Gateway persisting vendors to a single JSON file.
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a reader never observes a half-written store.
pub struct FileGateway {
    path: PathBuf,
    config: GatewayConfig,
    write_lock: Mutex<()>,
}

impl FileGateway {
    /// Create a gateway over the store at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>, config: GatewayConfig) -> Self {
        Self {
            path: path.into(),
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gateway configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Write `record` into the store at `path`, creating the file if needed
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be read, parsed or written.
    pub async fn seed(path: impl Into<PathBuf>, record: &VendorContactRecord) -> Result<()> {
        Self::new(path, GatewayConfig::instant())
            .save_vendor(record)
            .await
    }

    /// Read the whole store. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub async fn load_store(&self) -> Result<VendorStore> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(VendorStore::default()),
            Err(e) => return Err(GatewayError::io(self.display_path(), e.to_string())),
        };
        serde_json::from_slice(&bytes)
            .map_err(|e| GatewayError::format(self.display_path(), e.to_string()))
    }

    async fn write_store(&self, store: &VendorStore) -> Result<()> {
        let json = serde_json::to_vec_pretty(store)
            .map_err(|e| GatewayError::format(self.display_path(), e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| GatewayError::io(parent.display().to_string(), e.to_string()))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| GatewayError::io(tmp.display().to_string(), e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| GatewayError::io(self.display_path(), e.to_string()))
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[async_trait]
impl DataGateway for FileGateway {
    async fn fetch_vendor(&self, vendor_id: Option<&str>) -> Result<VendorContactRecord> {
        let vendor_id = self.config.resolve_vendor(vendor_id).to_string();

        if !self.config.fetch_delay.is_zero() {
            tokio::time::sleep(self.config.fetch_delay).await;
        }

        let store = self
            .load_store()
            .await
            .map_err(|e| GatewayError::fetch(&vendor_id, e.to_string()))?;
        let stored = store
            .vendors
            .get(&vendor_id)
            .ok_or_else(|| GatewayError::not_found(&vendor_id))?;

        debug!(%vendor_id, path = %self.path.display(), "fetched vendor from store file");
        Ok(stored.record.clone())
    }

    async fn save_vendor(&self, record: &VendorContactRecord) -> Result<()> {
        if record.id.is_empty() {
            return Err(GatewayError::save("", "record has no vendor id"));
        }

        if !self.config.save_delay.is_zero() {
            tokio::time::sleep(self.config.save_delay).await;
        }

        let _guard = self.write_lock.lock().await;
        let mut store = self
            .load_store()
            .await
            .map_err(|e| GatewayError::save(&record.id, e.to_string()))?;
        store.vendors.insert(
            record.id.clone(),
            StoredVendor {
                record: record.clone(),
                updated_at: Utc::now(),
            },
        );
        self.write_store(&store)
            .await
            .map_err(|e| GatewayError::save(&record.id, e.to_string()))?;

        info!(vendor_id = %record.id, path = %self.path.display(), "saved vendor to store file");
        Ok(())
    }
}
