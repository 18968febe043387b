// SPDX-License-Identifier: MPL-2.0
//! End-to-end tests over real sockets: the site router on one listener and a
//! stand-in for the Bangumi API on another.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use portfolio_site::app::{self, AppState};
use portfolio_site::bangumi::{BangumiService, CollectionType};
use portfolio_site::config::{BangumiConfig, Config};
use portfolio_site::error::BangumiError;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct MockBangumi {
    hits: AtomicUsize,
    last_query: Mutex<HashMap<String, String>>,
    last_auth: Mutex<Option<String>>,
    last_user: Mutex<Option<String>>,
}

async fn collections(
    State(mock): State<Arc<MockBangumi>>,
    Path(username): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    *mock.last_user.lock().unwrap() = Some(username.clone());
    *mock.last_query.lock().unwrap() = query;
    *mock.last_auth.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    match username.as_str() {
        "zangwei" => Json(json!({
            "data": [{
                "subject": {
                    "id": 12,
                    "name": "Chobits",
                    "name_cn": "人形电脑天使心",
                    "date": "2002-04-02",
                    "images": { "common": "https://lain.bgm.tv/pic/cover/c/12.jpg" },
                    "eps": 24,
                    "score": 7.7
                },
                "ep_status": 5,
                "updated_at": "2025-01-02T03:04:05+08:00"
            }],
            "total": 1,
            "limit": 30,
            "offset": 0
        }))
        .into_response(),
        "garbled" => "not json".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server runs");
    });
    format!("http://{addr}")
}

async fn spawn_mock() -> (Arc<MockBangumi>, String) {
    let mock = Arc::new(MockBangumi::default());
    let router = Router::new()
        .route("/v0/users/{username}/collections", get(collections))
        .with_state(Arc::clone(&mock));
    let base = spawn(router).await;
    (mock, base)
}

fn bangumi_settings(api_base: &str, username: &str) -> BangumiConfig {
    BangumiConfig {
        username: Some(username.to_string()),
        token: Some("secret".to_string()),
        api_base: Some(api_base.to_string()),
        limit: Some(12),
        ..BangumiConfig::default()
    }
}

#[tokio::test]
async fn service_sends_query_and_token_then_caches() {
    let (mock, base) = spawn_mock().await;
    let service = BangumiService::new(bangumi_settings(&base, "zangwei")).expect("client builds");

    let first = service.collections().await;
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].subject.name_cn, "人形电脑天使心");
    assert_eq!(first[0].ep_status, 5);

    {
        let query = mock.last_query.lock().unwrap();
        assert_eq!(query.get("subject_type").map(String::as_str), Some("2"));
        assert_eq!(query.get("type").map(String::as_str), Some("3"));
        assert_eq!(query.get("limit").map(String::as_str), Some("12"));
        assert_eq!(query.get("offset").map(String::as_str), Some("0"));
    }
    assert_eq!(mock.last_auth.lock().unwrap().as_deref(), Some("Bearer secret"));

    let second = service.collections().await;
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(mock.hits.load(Ordering::SeqCst), 1);

    // Another shelf is a different cache entry.
    service.collections_of(CollectionType::Done).await;
    assert_eq!(mock.hits.load(Ordering::SeqCst), 2);

    service.clear_cache().await;
    service.collections().await;
    assert_eq!(mock.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn zero_ttl_disables_cache() {
    let (mock, base) = spawn_mock().await;
    let service = BangumiService::new(BangumiConfig {
        cache_ttl_secs: Some(0),
        ..bangumi_settings(&base, "zangwei")
    })
    .expect("client builds");

    service.collections().await;
    service.collections().await;
    assert_eq!(mock.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn service_reports_status_and_decode_failures() {
    let (_mock, base) = spawn_mock().await;

    let missing = BangumiService::new(bangumi_settings(&base, "nobody")).expect("client builds");
    let err = missing
        .try_collections_of(CollectionType::Watching)
        .await
        .expect_err("unknown user fails");
    assert_eq!(err, BangumiError::Status(404));
    assert!(missing.collections().await.is_empty());

    let garbled = BangumiService::new(bangumi_settings(&base, "garbled")).expect("client builds");
    let err = garbled
        .try_collections_of(CollectionType::Watching)
        .await
        .expect_err("bad body fails");
    assert!(matches!(err, BangumiError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn reserved_characters_stay_inside_the_username() {
    let (mock, base) = spawn_mock().await;

    for name in ["a?b#c", "x/../../admin"] {
        let service = BangumiService::new(bangumi_settings(&base, name)).expect("client builds");
        let err = service
            .try_collections_of(CollectionType::Watching)
            .await
            .expect_err("unknown user fails");
        assert_eq!(err, BangumiError::Status(404));

        assert_eq!(mock.last_user.lock().unwrap().as_deref(), Some(name));
        let query = mock.last_query.lock().unwrap();
        assert_eq!(query.get("subject_type").map(String::as_str), Some("2"));
        assert_eq!(query.get("offset").map(String::as_str), Some("0"));
    }
    assert_eq!(mock.hits.load(Ordering::SeqCst), 2);
}

async fn spawn_site(api_base: &str) -> String {
    spawn_site_for(api_base, "zangwei").await
}

async fn spawn_site_for(api_base: &str, username: &str) -> String {
    let config = Config {
        bangumi: bangumi_settings(api_base, username),
        ..Config::default()
    };
    let state = Arc::new(AppState::new(&config).expect("state builds"));
    spawn(app::router(state)).await
}

async fn fetch(url: &str) -> (StatusCode, String, String) {
    let response = reqwest::get(url).await.expect("request succeeds");
    let status = StatusCode::from_u16(response.status().as_u16()).expect("valid status");
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = response.text().await.expect("body reads");
    (status, content_type, body)
}

#[tokio::test]
async fn home_page_follows_lang_parameter() {
    let (_mock, api) = spawn_mock().await;
    let site = spawn_site(&api).await;

    let (status, content_type, zh) = fetch(&format!("{site}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert!(zh.contains("<html lang=\"zh\">"));
    assert!(zh.contains("<h2>关于</h2>"));

    let (_, _, en) = fetch(&format!("{site}/?lang=en")).await;
    assert!(en.contains("<html lang=\"en\">"));
    assert!(en.contains("<h2>About</h2>"));

    let (status, _, fallback) = fetch(&format!("{site}/?lang=fr")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fallback.contains("<html lang=\"zh\">"));
}

#[tokio::test]
async fn anime_page_lists_collection_in_requested_locale() {
    let (_mock, api) = spawn_mock().await;
    let site = spawn_site(&api).await;

    let (_, _, zh) = fetch(&format!("{site}/anime")).await;
    assert!(zh.contains("人形电脑天使心"));
    assert!(zh.contains("进度: 5/24"));

    let (_, _, en) = fetch(&format!("{site}/anime?lang=en")).await;
    assert!(en.contains("Chobits"));
    assert!(en.contains("Progress: 5/24"));
    assert!(en.contains("2002"));
}

#[tokio::test]
async fn failed_fetch_renders_no_anime_message() {
    let (_mock, api) = spawn_mock().await;

    for username in ["nobody", "garbled"] {
        let site = spawn_site_for(&api, username).await;

        let (status, _, en) = fetch(&format!("{site}/anime?lang=en")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(en.contains("<p class=\"empty\">Nothing on the watch list at the moment.</p>"));
        assert!(!en.contains("anime-grid"));
        assert!(!en.contains("MISSING:"));

        let (_, _, zh) = fetch(&format!("{site}/anime")).await;
        assert!(zh.contains("暂时没有在看的番剧。"));
    }
}

#[tokio::test]
async fn sitemap_is_served_as_xml() {
    let (_mock, api) = spawn_mock().await;
    let site = spawn_site(&api).await;

    let (status, content_type, body) = fetch(&format!("{site}/sitemap.xml")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("application/xml"));
    assert!(body.contains("<urlset"));
    assert!(body.contains("/anime?lang=en</loc>"));
}
