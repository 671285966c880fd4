//! In-memory adapters
//!
//! The simplest conformant backend: a process-wide map behind a
//! `parking_lot::RwLock`. No persistence across restarts; also serves
//! as the safe fallback when no durable backend is configured.

use crate::contract::{ConfigDocument, Identified, KeywordStats, SearchLogEntry};
use crate::domain::repository::{ConfigStore, DurableSource, ResourceStore, SearchLogStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

// ===== Config store =====

#[derive(Default)]
pub struct MemoryConfigStore {
    data: RwLock<HashMap<String, ConfigDocument>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn load(&self, key: &str) -> Result<Option<ConfigDocument>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn save(&self, doc: &ConfigDocument) -> Result<ConfigDocument> {
        let mut data = self.data.write();
        let mut saved = doc.clone();
        // upsert keeps the original creation stamp and owns updated_at
        if let Some(existing) = data.get(&doc.key) {
            saved.created_at = existing.created_at;
        }
        saved.updated_at = Utc::now();
        data.insert(saved.key.clone(), saved.clone());
        Ok(saved)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.data.write().remove(key).is_some())
    }

    async fn list(&self) -> Result<Vec<ConfigDocument>> {
        let mut docs: Vec<ConfigDocument> = self.data.read().values().cloned().collect();
        docs.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(docs)
    }
}

// ===== Resource store =====

pub struct MemoryResourceStore<R> {
    data: RwLock<HashMap<Uuid, R>>,
}

impl<R> Default for MemoryResourceStore<R> {
    fn default() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl<R> MemoryResourceStore<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<R> ResourceStore<R> for MemoryResourceStore<R>
where
    R: Identified + Clone + Send + Sync,
{
    async fn insert(&self, item: &R) -> Result<R> {
        self.data.write().insert(item.id(), item.clone());
        Ok(item.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<R>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn update(&self, item: &R) -> Result<Option<R>> {
        let mut data = self.data.write();
        if !data.contains_key(&item.id()) {
            return Ok(None);
        }
        data.insert(item.id(), item.clone());
        Ok(Some(item.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        Ok(self.data.write().remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<R>> {
        Ok(self.data.read().values().cloned().collect())
    }
}

// ===== Search log =====

#[derive(Default)]
pub struct MemorySearchLog {
    entries: RwLock<Vec<SearchLogEntry>>,
}

impl MemorySearchLog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchLogStore for MemorySearchLog {
    async fn record(&self, entry: SearchLogEntry) -> Result<()> {
        self.entries.write().push(entry);
        Ok(())
    }

    async fn aggregate(&self, lookback_days: u32) -> Result<Vec<KeywordStats>> {
        let cutoff = Utc::now() - Duration::days(lookback_days as i64);
        let entries = self.entries.read();

        let mut grouped: HashMap<String, (u64, u64, u64)> = HashMap::new();
        for entry in entries.iter().filter(|e| e.searched_at >= cutoff) {
            let slot = grouped.entry(entry.keyword.clone()).or_default();
            slot.0 += 1;
            if entry.clicked {
                slot.1 += 1;
            }
            slot.2 += entry.result_count as u64;
        }

        let mut stats: Vec<KeywordStats> = grouped
            .into_iter()
            .map(|(keyword, (count, clicks, results))| KeywordStats {
                keyword,
                count,
                clicks,
                avg_result_count: if count == 0 {
                    0.0
                } else {
                    results as f64 / count as f64
                },
            })
            .collect();

        stats.sort_by(|a, b| a.keyword.cmp(&b.keyword));
        Ok(stats)
    }
}

/// Memory-backed `DurableSource`, useful as the inner source of the
/// caching decorator in tests and single-process deployments.
#[derive(Default)]
pub struct MemorySource {
    data: RwLock<HashMap<String, ConfigDocument>>,
    /// Bumped on every write so the cache sees a version change
    revision: RwLock<u64>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DurableSource for MemorySource {
    async fn fetch(&self, key: &str) -> Result<Option<ConfigDocument>> {
        Ok(self.data.read().get(key).cloned())
    }

    async fn put(&self, doc: &ConfigDocument) -> Result<()> {
        self.data.write().insert(doc.key.clone(), doc.clone());
        *self.revision.write() += 1;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let removed = self.data.write().remove(key).is_some();
        if removed {
            *self.revision.write() += 1;
        }
        Ok(removed)
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.data.read().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    async fn version(&self, _key: &str) -> Result<Option<String>> {
        Ok(Some(self.revision.read().to_string()))
    }
}
