//! In-process gateway backed by a concurrent map

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};
use vendor_model::{VendorContactRecord, sample_vendor};

use crate::{DataGateway, GatewayConfig, GatewayError, Result};

/// Gateway that keeps records in memory.
///
/// Latency is simulated with `tokio::time::sleep` and failures can be
/// injected per call, which makes it the gateway of choice for exercising the
/// form's loading and saving paths.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    inner: Arc<MemoryState>,
    config: GatewayConfig,
}

#[derive(Default)]
struct MemoryState {
    records: DashMap<String, VendorContactRecord>,
    fail_next_fetch: AtomicBool,
    fail_next_save: AtomicBool,
    fail_fetches: AtomicBool,
    fail_saves: AtomicBool,
    fetch_calls: AtomicU64,
    save_calls: AtomicU64,
}

impl MemoryGateway {
    /// Create an empty gateway
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            inner: Arc::new(MemoryState::default()),
            config,
        }
    }

    /// Create a gateway holding the demo vendor
    pub fn demo(config: GatewayConfig) -> Self {
        let gateway = Self::new(config);
        gateway.insert(sample_vendor());
        gateway
    }

    /// Store a record directly, bypassing latency and failure injection
    pub fn insert(&self, record: VendorContactRecord) {
        self.inner.records.insert(record.id.clone(), record);
    }

    /// Read a stored record directly
    pub fn get(&self, vendor_id: &str) -> Option<VendorContactRecord> {
        self.inner.records.get(vendor_id).map(|r| r.value().clone())
    }

    /// Gateway configuration
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Make the next fetch fail once
    pub fn fail_next_fetch(&self) {
        self.inner.fail_next_fetch.store(true, Ordering::SeqCst);
    }

    /// Make the next save fail once
    pub fn fail_next_save(&self) {
        self.inner.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Make every fetch fail until switched off
    pub fn fail_fetches(&self, fail: bool) {
        self.inner.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make every save fail until switched off
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of fetch calls received
    pub fn fetch_calls(&self) -> u64 {
        self.inner.fetch_calls.load(Ordering::SeqCst)
    }

    /// Number of save calls received
    pub fn save_calls(&self) -> u64 {
        self.inner.save_calls.load(Ordering::SeqCst)
    }

    fn should_fail(once: &AtomicBool, always: &AtomicBool) -> bool {
        once.swap(false, Ordering::SeqCst) || always.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataGateway for MemoryGateway {
    async fn fetch_vendor(&self, vendor_id: Option<&str>) -> Result<VendorContactRecord> {
        let vendor_id = self.config.resolve_vendor(vendor_id).to_string();
        self.inner.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if !self.config.fetch_delay.is_zero() {
            tokio::time::sleep(self.config.fetch_delay).await;
        }

        if Self::should_fail(&self.inner.fail_next_fetch, &self.inner.fail_fetches) {
            warn!(%vendor_id, "injected fetch failure");
            return Err(GatewayError::fetch(vendor_id, "simulated network failure"));
        }

        let record = self
            .get(&vendor_id)
            .ok_or_else(|| GatewayError::not_found(&vendor_id))?;
        debug!(%vendor_id, "fetched vendor from memory");
        Ok(record)
    }

    async fn save_vendor(&self, record: &VendorContactRecord) -> Result<()> {
        self.inner.save_calls.fetch_add(1, Ordering::SeqCst);

        if !self.config.save_delay.is_zero() {
            tokio::time::sleep(self.config.save_delay).await;
        }

        if Self::should_fail(&self.inner.fail_next_save, &self.inner.fail_saves) {
            warn!(vendor_id = %record.id, "injected save failure");
            return Err(GatewayError::save(&record.id, "simulated server failure"));
        }

        self.insert(record.clone());
        debug!(vendor_id = %record.id, "saved vendor to memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_default_vendor() {
        let gateway = MemoryGateway::demo(GatewayConfig::instant());
        let record = gateway.fetch_vendor(None).await.unwrap();
        assert_eq!(record, sample_vendor());
        assert_eq!(gateway.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_unknown_vendor_is_not_found() {
        let gateway = MemoryGateway::new(GatewayConfig::instant());
        let err = gateway.fetch_vendor(Some("nobody")).await.unwrap_err();
        assert_eq!(err, GatewayError::not_found("nobody"));
    }

    #[tokio::test]
    async fn test_fail_next_save_is_one_shot() {
        let gateway = MemoryGateway::demo(GatewayConfig::instant());
        let mut record = sample_vendor();
        record.city = "Shelbyville".to_string();

        gateway.fail_next_save();
        assert!(gateway.save_vendor(&record).await.unwrap_err().is_save());
        assert_eq!(gateway.get("v123456").unwrap().city, "Springfield");

        gateway.save_vendor(&record).await.unwrap();
        assert_eq!(gateway.get("v123456").unwrap().city, "Shelbyville");
        assert_eq!(gateway.save_calls(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let gateway = MemoryGateway::demo(GatewayConfig::instant());
        let clone = gateway.clone();
        clone.fail_fetches(true);
        assert!(gateway.fetch_vendor(None).await.is_err());
        assert!(gateway.fetch_vendor(None).await.is_err());
        clone.fail_fetches(false);
        assert!(gateway.fetch_vendor(None).await.is_ok());
        assert_eq!(clone.fetch_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let gateway = MemoryGateway::demo(GatewayConfig::default());
        let started = tokio::time::Instant::now();
        gateway.fetch_vendor(None).await.unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(800));
    }
}
