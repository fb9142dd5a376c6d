#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vendor-gateway
//!
//! Data gateway contract and backends for vendor contact records.
//!
//! The contact form only ever talks to a [`DataGateway`]: one call to load
//! the vendor, one call per valid submit to persist it. Two backends are
//! provided:
//!
//! - [`MemoryGateway`]: a concurrent in-process map with simulated latency and
//!   failure injection, used for demos and tests.
//! - [`FileGateway`]: a JSON store file on disk.
//!
//! ## Example Usage
//!
//! ```rust
//! use vendor_gateway::{DataGateway, GatewayConfig, MemoryGateway};
//!
//! # tokio_test_block(async {
//! let gateway = MemoryGateway::demo(GatewayConfig::instant());
//! let record = gateway.fetch_vendor(Some("v123456")).await.unwrap();
//! assert_eq!(record.store_name, "Fresh Market Grocery");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use file::FileGateway;
pub use memory::MemoryGateway;

use async_trait::async_trait;
use vendor_model::VendorContactRecord;

/// Service boundary that loads and persists vendor records.
///
/// Implementations may fail on any call; callers treat every failure as
/// recoverable.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Load a vendor record. `None` selects the gateway's configured vendor.
    async fn fetch_vendor(&self, vendor_id: Option<&str>) -> Result<VendorContactRecord>;

    /// Persist a vendor record, keyed by its `id`.
    async fn save_vendor(&self, record: &VendorContactRecord) -> Result<()>;
}

#[async_trait]
impl<G: DataGateway + ?Sized> DataGateway for std::sync::Arc<G> {
    async fn fetch_vendor(&self, vendor_id: Option<&str>) -> Result<VendorContactRecord> {
        (**self).fetch_vendor(vendor_id).await
    }

    async fn save_vendor(&self, record: &VendorContactRecord) -> Result<()> {
        (**self).save_vendor(record).await
    }
}
