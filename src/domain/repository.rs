//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/.

use crate::contract::{ConfigDocument, KeywordStats, SearchLogEntry};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Capability interface over a configuration backend.
///
/// Upsert semantics on `save`: create if absent, overwrite payload,
/// active flag and timestamps if present. `delete` is physical removal.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load a document by key
    async fn load(&self, key: &str) -> Result<Option<ConfigDocument>>;

    /// Create or update a document (last save to complete wins per key)
    async fn save(&self, doc: &ConfigDocument) -> Result<ConfigDocument>;

    /// Physically remove a document; returns false when absent
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Fresh snapshot of all documents
    async fn list(&self) -> Result<Vec<ConfigDocument>>;
}

/// Minimal durable persistence collaborator.
///
/// File system, document database, external blob/JSON service all
/// qualify; the caching decorator in infra/cached.rs sits in front.
#[async_trait]
pub trait DurableSource: Send + Sync {
    /// Fetch a document by key from the durable store
    async fn fetch(&self, key: &str) -> Result<Option<ConfigDocument>>;

    /// Write a document through to the durable store
    async fn put(&self, doc: &ConfigDocument) -> Result<()>;

    /// Remove a document; returns false when absent
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Keys currently present in the durable store
    async fn list_keys(&self) -> Result<Vec<String>>;

    /// Cheap source version marker (e.g. file mtime, etag) used to
    /// decide whether a cached value is still current
    async fn version(&self, key: &str) -> Result<Option<String>>;
}

/// Shared handles to a source are sources themselves; lets callers
/// hold on to an `Arc`d source after handing it to a decorator.
#[async_trait]
impl<S: DurableSource + ?Sized> DurableSource for Arc<S> {
    async fn fetch(&self, key: &str) -> Result<Option<ConfigDocument>> {
        (**self).fetch(key).await
    }

    async fn put(&self, doc: &ConfigDocument) -> Result<()> {
        (**self).put(doc).await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        (**self).remove(key).await
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        (**self).list_keys().await
    }

    async fn version(&self, key: &str) -> Result<Option<String>> {
        (**self).version(key).await
    }
}

/// Search-log collaborator consumed by the hot-search aggregator.
#[async_trait]
pub trait SearchLogStore: Send + Sync {
    /// Record one search event
    async fn record(&self, entry: SearchLogEntry) -> Result<()>;

    /// Group log entries by keyword over the last `lookback_days`,
    /// returning count / click count / average result count per keyword
    async fn aggregate(&self, lookback_days: u32) -> Result<Vec<KeywordStats>>;
}

/// Uniform storage surface for booking resources.
#[async_trait]
pub trait ResourceStore<R: Send + Sync>: Send + Sync {
    /// Insert a new record
    async fn insert(&self, item: &R) -> Result<R>;

    /// Find a record by identity
    async fn find(&self, id: Uuid) -> Result<Option<R>>;

    /// Overwrite an existing record; returns None when absent
    async fn update(&self, item: &R) -> Result<Option<R>>;

    /// Physically remove a record; returns false when absent
    async fn remove(&self, id: Uuid) -> Result<bool>;

    /// Fresh snapshot of all records
    async fn list_all(&self) -> Result<Vec<R>>;
}
