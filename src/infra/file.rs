//! File-backed durable source
//!
//! All documents live in a single JSON file; the file's mtime serves
//! as the source version for cache invalidation. Writers are
//! serialized behind a mutex so concurrent saves cannot interleave a
//! read-modify-write cycle.

use crate::contract::ConfigDocument;
use crate::domain::repository::DurableSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;
use tokio::sync::Mutex;

/// Serialized form of a document; the map key carries the config key.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocRecord {
    payload: serde_json::Value,
    active: bool,
    last_modified_by: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocRecord {
    fn into_document(self, key: &str) -> ConfigDocument {
        ConfigDocument {
            key: key.to_string(),
            payload: self.payload,
            active: self.active,
            last_modified_by: self.last_modified_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<&ConfigDocument> for DocRecord {
    fn from(doc: &ConfigDocument) -> Self {
        Self {
            payload: doc.payload.clone(),
            active: doc.active,
            last_modified_by: doc.last_modified_by.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

pub struct FileSource {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<BTreeMap<String, DocRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(err).context(format!("reading {}", self.path.display()));
            }
        };

        serde_json::from_slice(&bytes)
            .context(format!("parsing {}", self.path.display()))
    }

    async fn write_map(&self, map: &BTreeMap<String, DocRecord>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .context(format!("writing {}", self.path.display()))
    }
}

#[async_trait]
impl DurableSource for FileSource {
    async fn fetch(&self, key: &str) -> Result<Option<ConfigDocument>> {
        let mut map = self.read_map().await?;
        Ok(map.remove(key).map(|r| r.into_document(key)))
    }

    async fn put(&self, doc: &ConfigDocument) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(doc.key.clone(), DocRecord::from(doc));
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.read_map().await?;
        let removed = map.remove(key).is_some();
        if removed {
            self.write_map(&map).await?;
        }
        Ok(removed)
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.read_map().await?.into_keys().collect())
    }

    /// Whole-file mtime in milliseconds since epoch. Coarse, but a
    /// write to any key invalidates every cached entry at worst.
    async fn version(&self, _key: &str) -> Result<Option<String>> {
        let meta = match tokio::fs::metadata(&self.path).await {
            Ok(meta) => meta,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).context(format!("stat {}", self.path.display()));
            }
        };

        let mtime = meta
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis().to_string());

        Ok(mtime)
    }
}
