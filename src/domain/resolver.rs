//! Config resolution service
//!
//! Composes the mode resolver and a backend adapter: reads return the
//! stored active document or the mode-appropriate compiled-in default,
//! never an error. Writes are admin-gated and fail loudly when the
//! backend is unreachable.

use crate::contract::{AuthContext, ConfigDocument, PlatformError, ResolvedConfig};
use crate::domain::defaults::default_payload;
use crate::domain::mode::ModeResolver;
use crate::domain::repository::ConfigStore;
use crate::domain::validation::{validate_config_key, validate_payload_size};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct ConfigService {
    store: Arc<dyn ConfigStore>,
    modes: Arc<ModeResolver>,
    max_payload_bytes: usize,
}

impl ConfigService {
    pub fn new(
        store: Arc<dyn ConfigStore>,
        modes: Arc<ModeResolver>,
        max_payload_bytes: usize,
    ) -> Self {
        Self {
            store,
            modes,
            max_payload_bytes,
        }
    }

    /// Resolve a config key. Always succeeds: a stored active document
    /// wins, otherwise the compiled-in default for the current mode,
    /// otherwise an empty object.
    pub async fn get_config(&self, key: &str) -> ResolvedConfig {
        match self.store.load(key).await {
            Ok(Some(doc)) if doc.active => {
                return ResolvedConfig {
                    key: key.to_string(),
                    payload: doc.payload,
                    is_default: false,
                };
            }
            Ok(_) => {}
            Err(err) => {
                // Read path degrades to defaults instead of surfacing
                // backend trouble to catalog browsers.
                warn!(key, error = %err, "config load failed, serving default");
            }
        }

        let mode = self.modes.current().await;
        let payload = default_payload(key, mode).unwrap_or_else(|| json!({}));

        ResolvedConfig {
            key: key.to_string(),
            payload,
            is_default: true,
        }
    }

    /// Upsert a config document. Admin only; key must be a known
    /// config type.
    pub async fn set_config(
        &self,
        key: &str,
        payload: serde_json::Value,
        active: bool,
        auth: &AuthContext,
    ) -> Result<ConfigDocument, PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        validate_config_key(key)?;
        validate_payload_size(&payload, self.max_payload_bytes)?;

        let mut doc = ConfigDocument::new(key, payload);
        doc.active = active;
        doc.last_modified_by = auth.user_id.clone();

        let saved = self
            .store
            .save(&doc)
            .await
            .map_err(PlatformError::backend)?;

        debug!(key, by = ?auth.user_id, "config document saved");
        Ok(saved)
    }

    /// Physically remove a config document. Admin only.
    pub async fn delete_config(&self, key: &str, auth: &AuthContext) -> Result<(), PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        validate_config_key(key)?;

        let removed = self
            .store
            .delete(key)
            .await
            .map_err(PlatformError::backend)?;

        if !removed {
            return Err(PlatformError::not_found("config", key));
        }

        debug!(key, by = ?auth.user_id, "config document deleted");
        Ok(())
    }

    /// Snapshot of all active documents known to the backend.
    pub async fn list_configs(&self) -> Result<Vec<ConfigDocument>, PlatformError> {
        let docs = self.store.list().await.map_err(PlatformError::backend)?;
        Ok(docs.into_iter().filter(|d| d.active).collect())
    }
}
