//! TTL caching decorator over a durable source
//!
//! Read policy: serve the cached value while fresh; on expiry re-check
//! the source version before re-fetching; on any fetch failure serve
//! the last-known stale value rather than erroring (stale-read over
//! hard failure). Write policy: write through and surface failures to
//! the caller; the cache is only refreshed after a successful durable
//! write, so a failed save never leaves the cache claiming the new
//! value.

use crate::contract::ConfigDocument;
use crate::domain::repository::{ConfigStore, DurableSource};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

struct CacheEntry {
    doc: ConfigDocument,
    fetched_at: Instant,
    version: Option<String>,
}

pub struct CachedStore<S> {
    source: S,
    /// Maximum age before a cached value must be re-validated
    ttl: Duration,
    /// Per-call budget for durable source I/O
    fetch_timeout: Duration,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl<S: DurableSource> CachedStore<S> {
    pub fn new(source: S, ttl: Duration, fetch_timeout: Duration) -> Self {
        Self {
            source,
            ttl,
            fetch_timeout,
            cache: RwLock::new(HashMap::new()),
        }
    }

    async fn with_timeout<T, F>(&self, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.fetch_timeout, fut)
            .await
            .map_err(|_| anyhow::anyhow!("durable source call timed out"))?
    }

    fn cached(&self, key: &str) -> Option<(ConfigDocument, Instant, Option<String>)> {
        self.cache
            .read()
            .get(key)
            .map(|e| (e.doc.clone(), e.fetched_at, e.version.clone()))
    }

    fn store_entry(&self, key: &str, doc: ConfigDocument, version: Option<String>) {
        self.cache.write().insert(
            key.to_string(),
            CacheEntry {
                doc,
                fetched_at: Instant::now(),
                version,
            },
        );
    }

    /// Mark a cached entry as fresh again without re-fetching.
    fn touch(&self, key: &str) {
        if let Some(entry) = self.cache.write().get_mut(key) {
            entry.fetched_at = Instant::now();
        }
    }

    async fn fetch_and_cache(&self, key: &str) -> Result<Option<ConfigDocument>> {
        let doc = self.with_timeout(self.source.fetch(key)).await?;

        match doc {
            Some(doc) => {
                let version = self
                    .with_timeout(self.source.version(key))
                    .await
                    .unwrap_or(None);
                self.store_entry(key, doc.clone(), version);
                Ok(Some(doc))
            }
            None => {
                // absent at the source counts as a miss, not an error;
                // stale fallback is handled by the caller
                anyhow::bail!("key absent at durable source")
            }
        }
    }
}

#[async_trait]
impl<S: DurableSource> ConfigStore for CachedStore<S> {
    async fn load(&self, key: &str) -> Result<Option<ConfigDocument>> {
        let cached = self.cached(key);

        // fresh hit: no I/O at all
        if let Some((doc, fetched_at, _)) = &cached {
            if fetched_at.elapsed() < self.ttl {
                return Ok(Some(doc.clone()));
            }
        }

        // expired entry: a cheap version probe can spare the fetch
        if let Some((doc, _, Some(version))) = &cached {
            if let Ok(Some(current)) = self.with_timeout(self.source.version(key)).await {
                if &current == version {
                    self.touch(key);
                    return Ok(Some(doc.clone()));
                }
            }
        }

        match self.fetch_and_cache(key).await {
            Ok(doc) => Ok(doc),
            Err(err) => match cached {
                Some((doc, _, _)) => {
                    warn!(key, error = %err, "durable fetch failed, serving stale cache");
                    Ok(Some(doc))
                }
                None => {
                    debug!(key, error = %err, "durable fetch failed with no cached value");
                    Ok(None)
                }
            },
        }
    }

    async fn save(&self, doc: &ConfigDocument) -> Result<ConfigDocument> {
        let mut saved = doc.clone();
        match self.cached(&doc.key) {
            Some((existing, _, _)) => saved.created_at = existing.created_at,
            // Not cached does not mean new: the key may already exist at
            // the source, and an upsert must keep its creation stamp.
            None => {
                if let Some(existing) = self
                    .with_timeout(self.source.fetch(&doc.key))
                    .await
                    .unwrap_or(None)
                {
                    saved.created_at = existing.created_at;
                }
            }
        }
        saved.updated_at = Utc::now();

        self.with_timeout(self.source.put(&saved))
            .await
            .context("durable save failed")?;

        let version = self
            .with_timeout(self.source.version(&saved.key))
            .await
            .unwrap_or(None);
        self.store_entry(&saved.key, saved.clone(), version);

        Ok(saved)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let removed = self
            .with_timeout(self.source.remove(key))
            .await
            .context("durable delete failed")?;

        self.cache.write().remove(key);
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<ConfigDocument>> {
        let keys = match self.with_timeout(self.source.list_keys()).await {
            Ok(keys) => keys,
            Err(err) => {
                // degrade to whatever the cache holds
                warn!(error = %err, "durable key listing failed, serving cached snapshot");
                let cache = self.cache.read();
                let mut docs: Vec<ConfigDocument> =
                    cache.values().map(|e| e.doc.clone()).collect();
                docs.sort_by(|a, b| a.key.cmp(&b.key));
                return Ok(docs);
            }
        };

        let mut docs = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(doc) = self.load(&key).await? {
                docs.push(doc);
            }
        }
        Ok(docs)
    }
}
