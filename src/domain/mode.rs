//! Mode resolver - the single authority for the active content mode
//!
//! Precedence: persisted `app_mode` document > environment override >
//! `Mode::Review`. The read path never errors; anything invalid
//! collapses to the review default. All other components consult this
//! resolver instead of reading environment state directly.

use crate::contract::{AuthContext, ConfigDocument, Mode, PlatformError};
use crate::domain::repository::ConfigStore;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Key of the persisted mode override document.
pub const APP_MODE_KEY: &str = "app_mode";

pub struct ModeResolver {
    store: Arc<dyn ConfigStore>,
    /// Environment-level override, validated lazily on each read
    env_mode: Option<String>,
}

impl ModeResolver {
    pub fn new(store: Arc<dyn ConfigStore>, env_mode: Option<String>) -> Self {
        Self { store, env_mode }
    }

    /// Resolve the active mode.
    ///
    /// Consults the store on every call; any TTL caching is the
    /// backend adapter's concern, not this resolver's.
    pub async fn current(&self) -> Mode {
        match self.store.load(APP_MODE_KEY).await {
            Ok(Some(doc)) if doc.active => {
                if let Some(value) = doc.payload.get("mode").and_then(|v| v.as_str()) {
                    match value.parse::<Mode>() {
                        Ok(mode) => return mode,
                        Err(_) => {
                            warn!(value, "persisted app_mode is invalid, ignoring override");
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(err) => {
                debug!(error = %err, "app_mode lookup failed, falling back");
            }
        }

        if let Some(raw) = self.env_mode.as_deref() {
            if let Ok(mode) = raw.parse::<Mode>() {
                return mode;
            }
            warn!(value = raw, "environment mode is invalid, using review");
        }

        Mode::Review
    }

    /// Persist a mode override. Admin only; rejects unrecognized values.
    pub async fn set_mode(&self, value: &str, auth: &AuthContext) -> Result<Mode, PlatformError> {
        if !auth.is_admin {
            return Err(PlatformError::PermissionDenied);
        }

        let mode: Mode = value.parse()?;

        let mut doc = ConfigDocument::new(APP_MODE_KEY, json!({ "mode": mode.as_str() }));
        doc.last_modified_by = auth.user_id.clone();

        self.store
            .save(&doc)
            .await
            .map_err(PlatformError::backend)?;

        debug!(mode = %mode, by = ?auth.user_id, "content mode updated");
        Ok(mode)
    }
}
