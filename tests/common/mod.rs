//! Common test utilities: service wiring helpers and a fault-injecting
//! durable source.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use clinic_platform::contract::{ConfigDocument, SearchLogEntry};
use clinic_platform::domain::repository::{ConfigStore, DurableSource, SearchLogStore};
use clinic_platform::domain::resources::{ClinicService, NewClinic};
use clinic_platform::domain::{ConfigService, HotSearchService, ModeResolver};
use clinic_platform::infra::{MemoryConfigStore, MemoryResourceStore, MemorySearchLog, MemorySource};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const MAX_PAYLOAD: usize = 1024 * 1024;

/// Config service over an in-memory store with no environment mode.
pub fn config_service() -> Arc<ConfigService> {
    config_service_with_env(None)
}

pub fn config_service_with_env(env_mode: Option<&str>) -> Arc<ConfigService> {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    config_service_over(store, env_mode)
}

pub fn config_service_over(
    store: Arc<dyn ConfigStore>,
    env_mode: Option<&str>,
) -> Arc<ConfigService> {
    let modes = Arc::new(ModeResolver::new(
        store.clone(),
        env_mode.map(str::to_string),
    ));
    Arc::new(ConfigService::new(store, modes, MAX_PAYLOAD))
}

/// Hot-search service over in-memory config and the given log.
pub fn hot_search_service(
    configs: Arc<ConfigService>,
    logs: Arc<MemorySearchLog>,
) -> HotSearchService {
    HotSearchService::new(configs, logs, 15)
}

/// Record `count` searches for a keyword, `clicks` of them clicked.
pub async fn log_searches(logs: &MemorySearchLog, keyword: &str, count: u64, clicks: u64) {
    for i in 0..count {
        logs.record(SearchLogEntry {
            keyword: keyword.to_string(),
            clicked: i < clicks,
            result_count: 5,
            searched_at: Utc::now(),
        })
        .await
        .unwrap();
    }
}

/// Clinic service over a fresh in-memory store.
pub fn clinic_service() -> (Arc<ClinicService>, Arc<MemoryResourceStore<clinic_platform::contract::Clinic>>) {
    let store = Arc::new(MemoryResourceStore::new());
    (Arc::new(ClinicService::new(store.clone())), store)
}

/// Minimal valid clinic input.
pub fn sample_clinic(name: &str) -> NewClinic {
    NewClinic {
        name: name.to_string(),
        district: "Gangnam".to_string(),
        address: "123 Apgujeong-ro".to_string(),
        phone: "+82-2-555-0199".to_string(),
        description: "Full-service aesthetic clinic".to_string(),
        ..NewClinic::default()
    }
}

/// Durable source whose failures can be toggled at runtime: fail fast,
/// or hang past any reasonable fetch timeout. Writes delegate to an
/// inner [`MemorySource`] so state survives outages.
pub struct FlakySource {
    inner: MemorySource,
    failing: AtomicBool,
    hanging: AtomicBool,
}

impl FlakySource {
    pub fn new() -> Self {
        Self {
            inner: MemorySource::new(),
            failing: AtomicBool::new(false),
            hanging: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_hanging(&self, hanging: bool) {
        self.hanging.store(hanging, Ordering::SeqCst);
    }

    /// Write to the inner source bypassing fault injection, simulating
    /// an out-of-band change another process made.
    pub async fn put_direct(&self, doc: &ConfigDocument) -> Result<()> {
        self.inner.put(doc).await
    }

    async fn check(&self) -> Result<()> {
        if self.hanging.load(Ordering::SeqCst) {
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("injected backend outage");
        }
        Ok(())
    }
}

impl Default for FlakySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DurableSource for FlakySource {
    async fn fetch(&self, key: &str) -> Result<Option<ConfigDocument>> {
        self.check().await?;
        self.inner.fetch(key).await
    }

    async fn put(&self, doc: &ConfigDocument) -> Result<()> {
        self.check().await?;
        self.inner.put(doc).await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        self.check().await?;
        self.inner.remove(key).await
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        self.check().await?;
        self.inner.list_keys().await
    }

    async fn version(&self, key: &str) -> Result<Option<String>> {
        self.check().await?;
        self.inner.version(key).await
    }
}
