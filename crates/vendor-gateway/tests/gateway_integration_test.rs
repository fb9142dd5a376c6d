//! Integration tests for vendor-gateway crate

use std::sync::Arc;

use vendor_gateway::{DataGateway, FileGateway, GatewayConfig, GatewayError, MemoryGateway};
use vendor_model::{ContactField, sample_vendor};

#[tokio::test]
async fn seeded_file_store_round_trips_through_trait_object() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("vendors.json");
    FileGateway::seed(&path, &sample_vendor()).await?;

    let gateway: Arc<dyn DataGateway> =
        Arc::new(FileGateway::new(&path, GatewayConfig::instant()));

    let mut record = gateway.fetch_vendor(Some("v123456")).await?;
    assert_eq!(record, sample_vendor());

    record.set(ContactField::City, "Capital City");
    gateway.save_vendor(&record).await?;

    let reloaded = gateway.fetch_vendor(None).await?;
    assert_eq!(reloaded.city, "Capital City");
    Ok(())
}

#[tokio::test]
async fn file_store_keeps_multiple_vendors() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let gateway = FileGateway::new(dir.path().join("vendors.json"), GatewayConfig::instant());

    let mut other = sample_vendor();
    other.id = "v999".to_string();
    other.store_name = "Other Store".to_string();

    gateway.save_vendor(&sample_vendor()).await?;
    gateway.save_vendor(&other).await?;

    let store = gateway.load_store().await?;
    assert_eq!(store.vendors.len(), 2);
    assert_eq!(
        gateway.fetch_vendor(Some("v999")).await?.store_name,
        "Other Store"
    );
    Ok(())
}

#[tokio::test]
async fn memory_gateway_behind_arc_counts_calls() {
    let memory = MemoryGateway::demo(GatewayConfig::instant());
    let shared = Arc::new(memory.clone());

    shared.fail_next_fetch();
    let err = shared.fetch_vendor(None).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::fetch("v123456", "simulated network failure")
    );

    assert!(shared.fetch_vendor(None).await.is_ok());
    assert_eq!(memory.fetch_calls(), 2);
    assert_eq!(memory.save_calls(), 0);
}
