//! Config resolution and mode precedence tests

mod common;

use clinic_platform::contract::{AuthContext, Mode, PlatformError};
use clinic_platform::domain::repository::ConfigStore;
use clinic_platform::domain::{ConfigService, ModeResolver};
use clinic_platform::infra::MemoryConfigStore;
use serde_json::json;
use std::sync::Arc;

fn admin() -> AuthContext {
    AuthContext::admin(Some("admin-1".to_string()))
}

#[tokio::test]
async fn stored_active_document_wins_over_default() {
    let configs = common::config_service();
    let payload = json!({ "items": [{ "keyword": "双眼皮", "priority": 100 }] });

    configs
        .set_config("hot_searches", payload.clone(), true, &admin())
        .await
        .unwrap();

    let resolved = configs.get_config("hot_searches").await;
    assert!(!resolved.is_default);
    assert_eq!(resolved.payload, payload);
}

#[tokio::test]
async fn missing_document_resolves_to_mode_default() {
    let configs = common::config_service();

    let resolved = configs.get_config("app_settings").await;
    assert!(resolved.is_default);
    // review mode is the fail-safe: bookings are off
    assert_eq!(resolved.payload["bookingEnabled"], json!(false));
}

#[tokio::test]
async fn inactive_document_is_skipped_in_favor_of_default() {
    let configs = common::config_service();

    configs
        .set_config("banner_images", json!({ "items": ["x.jpg"] }), false, &admin())
        .await
        .unwrap();

    let resolved = configs.get_config("banner_images").await;
    assert!(resolved.is_default);
}

#[tokio::test]
async fn unknown_key_resolves_to_empty_object() {
    let configs = common::config_service();

    let resolved = configs.get_config("no_such_key").await;
    assert!(resolved.is_default);
    assert_eq!(resolved.payload, json!({}));
}

#[tokio::test]
async fn set_config_rejects_non_admin() {
    let configs = common::config_service();

    let err = configs
        .set_config("districts", json!({}), true, &AuthContext::non_admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));
}

#[tokio::test]
async fn set_config_rejects_unknown_key() {
    let configs = common::config_service();

    let err = configs
        .set_config("bogus", json!({}), true, &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Validation { .. }));
}

#[tokio::test]
async fn app_mode_is_not_writable_through_config() {
    let configs = common::config_service();

    // mode changes go through the mode resolver, not the config surface
    let err = configs
        .set_config("app_mode", json!({ "mode": "production" }), true, &admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::Validation { .. }));
}

#[tokio::test]
async fn upsert_preserves_creation_stamp() {
    let configs = common::config_service();

    let first = configs
        .set_config("tags", json!({ "items": ["a"] }), true, &admin())
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = configs
        .set_config("tags", json!({ "items": ["a", "b"] }), true, &admin())
        .await
        .unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.payload["items"], json!(["a", "b"]));
}

#[tokio::test]
async fn delete_removes_document_and_restores_default() {
    let configs = common::config_service();

    configs
        .set_config("districts", json!({ "items": ["Hongdae"] }), true, &admin())
        .await
        .unwrap();
    configs.delete_config("districts", &admin()).await.unwrap();

    let resolved = configs.get_config("districts").await;
    assert!(resolved.is_default);

    // second delete: nothing left to remove
    let err = configs.delete_config("districts", &admin()).await.unwrap_err();
    assert!(matches!(err, PlatformError::NotFound { .. }));
}

#[tokio::test]
async fn delete_rejects_non_admin() {
    let configs = common::config_service();

    let err = configs
        .delete_config("districts", &AuthContext::non_admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));
}

#[tokio::test]
async fn list_configs_hides_inactive_documents() {
    let configs = common::config_service();

    configs
        .set_config("tags", json!({ "items": [] }), true, &admin())
        .await
        .unwrap();
    configs
        .set_config("districts", json!({ "items": [] }), false, &admin())
        .await
        .unwrap();

    let docs = configs.list_configs().await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].key, "tags");
}

// ===== Mode precedence =====

#[tokio::test]
async fn mode_defaults_to_review() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let modes = ModeResolver::new(store, None);

    assert_eq!(modes.current().await, Mode::Review);
}

#[tokio::test]
async fn environment_mode_overrides_review_default() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let modes = ModeResolver::new(store, Some("production".to_string()));

    assert_eq!(modes.current().await, Mode::Production);
}

#[tokio::test]
async fn invalid_environment_mode_falls_back_to_review() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let modes = ModeResolver::new(store, Some("staging".to_string()));

    assert_eq!(modes.current().await, Mode::Review);
}

#[tokio::test]
async fn persisted_mode_beats_environment() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let modes = ModeResolver::new(store, Some("production".to_string()));

    modes.set_mode("review", &admin()).await.unwrap();
    assert_eq!(modes.current().await, Mode::Review);
}

#[tokio::test]
async fn set_mode_rejects_non_admin_and_bad_values() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let modes = ModeResolver::new(store, None);

    let err = modes
        .set_mode("production", &AuthContext::non_admin())
        .await
        .unwrap_err();
    assert!(matches!(err, PlatformError::PermissionDenied));

    let err = modes.set_mode("turbo", &admin()).await.unwrap_err();
    assert!(matches!(err, PlatformError::InvalidMode { .. }));
}

#[tokio::test]
async fn mode_switch_changes_served_defaults() {
    let store: Arc<dyn ConfigStore> = Arc::new(MemoryConfigStore::new());
    let modes = Arc::new(ModeResolver::new(store.clone(), None));
    let configs = ConfigService::new(store, modes.clone(), common::MAX_PAYLOAD);

    let review = configs.get_config("app_settings").await;
    assert_eq!(review.payload["bookingEnabled"], json!(false));

    modes.set_mode("production", &admin()).await.unwrap();
    let production = configs.get_config("app_settings").await;
    assert_eq!(production.payload["bookingEnabled"], json!(true));
}
