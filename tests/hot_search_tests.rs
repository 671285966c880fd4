//! Hot-search aggregation over config + search log

mod common;

use axum::http::StatusCode;
use axum::Json;
use clinic_platform::api::rest::dto::RecordSearchRequest;
use clinic_platform::api::rest::handlers;
use clinic_platform::contract::{AuthContext, HotSearchSource};
use clinic_platform::infra::MemorySearchLog;
use clinic_platform::{AppState, Config};
use serde_json::json;
use std::sync::Arc;

fn admin() -> AuthContext {
    AuthContext::admin(Some("admin-1".to_string()))
}

#[tokio::test]
async fn admin_entries_rank_above_algorithm_candidates() {
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs.clone(), logs.clone());

    configs
        .set_config(
            "hot_searches",
            json!({ "items": [
                { "keyword": "双眼皮", "priority": 100, "isHot": true },
                { "keyword": "隆鼻", "priority": 90, "isHot": true }
            ]}),
            true,
            &admin(),
        )
        .await
        .unwrap();

    common::log_searches(&logs, "美白针", 20, 10).await;

    let entries = service.combined(10, 7).await;
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].keyword, "双眼皮");
    assert_eq!(entries[1].keyword, "隆鼻");
    assert_eq!(entries[2].keyword, "美白针");
    assert_eq!(entries[2].source, HotSearchSource::Algorithm);
    assert_eq!(entries[2].priority, 50);
}

#[tokio::test]
async fn admin_entry_wins_keyword_tie() {
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs.clone(), logs.clone());

    configs
        .set_config(
            "hot_searches",
            json!({ "items": [{ "keyword": "隆鼻", "priority": 100, "isHot": true }] }),
            true,
            &admin(),
        )
        .await
        .unwrap();

    // heavy organic traffic for the same keyword
    common::log_searches(&logs, "隆鼻", 50, 25).await;

    let entries = service.combined(10, 7).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, HotSearchSource::Admin);
    assert!(entries[0].is_hot);
}

#[tokio::test]
async fn frequently_searched_keywords_display_as_hot() {
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs.clone(), logs.clone());

    configs
        .set_config("hot_searches", json!({ "items": [] }), true, &admin())
        .await
        .unwrap();

    common::log_searches(&logs, "玻尿酸", 11, 0).await;
    common::log_searches(&logs, "水光针", 3, 0).await;

    let entries = service.combined(10, 7).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].keyword, "玻尿酸");
    assert!(entries[0].is_hot);
    assert!(!entries[1].is_hot);
}

#[tokio::test]
async fn clicked_keywords_outrank_unclicked_ones() {
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs.clone(), logs.clone());

    configs
        .set_config("hot_searches", json!({ "items": [] }), true, &admin())
        .await
        .unwrap();

    // 12 searches, all clicked -> score 24; 20 searches, none -> 20
    common::log_searches(&logs, "埋线", 12, 12).await;
    common::log_searches(&logs, "纹眉", 20, 0).await;

    let entries = service.combined(10, 7).await;
    assert_eq!(entries[0].keyword, "埋线");
    assert_eq!(entries[1].keyword, "纹眉");
}

#[tokio::test]
async fn result_limit_is_honored() {
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs.clone(), logs.clone());

    configs
        .set_config("hot_searches", json!({ "items": [] }), true, &admin())
        .await
        .unwrap();

    for keyword in ["a", "b", "c", "d", "e"] {
        common::log_searches(&logs, keyword, 2, 0).await;
    }

    let entries = service.combined(3, 7).await;
    assert_eq!(entries.len(), 3);
}

#[tokio::test]
async fn falls_back_to_default_list_when_nothing_is_stored() {
    // no stored config, empty log: the review-mode default list serves
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs, logs);

    let entries = service.combined(10, 7).await;
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e.source == HotSearchSource::Admin));
}

#[tokio::test]
async fn recorded_searches_feed_the_algorithm_list() {
    let state = AppState::in_memory(Config::default());
    state
        .configs
        .set_config("hot_searches", json!({ "items": [] }), true, &admin())
        .await
        .unwrap();

    for _ in 0..12 {
        let status = handlers::record_search(
            state.clone(),
            Json(RecordSearchRequest {
                keyword: "热玛吉".to_string(),
                clicked: true,
                result_count: 5,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    // blank keywords are acknowledged but never logged
    let status = handlers::record_search(
        state.clone(),
        Json(RecordSearchRequest {
            keyword: "   ".to_string(),
            clicked: false,
            result_count: 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let entries = state.hot_searches.combined(10, 7).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].keyword, "热玛吉");
    assert_eq!(entries[0].source, HotSearchSource::Algorithm);
    assert!(entries[0].is_hot);
}

#[tokio::test]
async fn malformed_stored_items_are_skipped_not_fatal() {
    let configs = common::config_service();
    let logs = Arc::new(MemorySearchLog::new());
    let service = common::hot_search_service(configs.clone(), logs);

    configs
        .set_config(
            "hot_searches",
            json!({ "items": [
                { "priority": 100 },
                { "keyword": "正常词" },
                42
            ]}),
            true,
            &admin(),
        )
        .await
        .unwrap();

    let entries = service.combined(10, 7).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].keyword, "正常词");
    assert_eq!(entries[0].priority, 100);
}
