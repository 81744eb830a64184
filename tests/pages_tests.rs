//! Catalog page and form-post tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use microtools_hub::config::AppConfig;
use microtools_hub::storage::FileStore;
use microtools_hub::storage::MemoryStore;
use microtools_hub::{build_router, AppState};
use tower::ServiceExt;

fn test_state(daily_limit: u32) -> Arc<AppState> {
    let config = AppConfig {
        daily_limit,
        ..AppConfig::default()
    };
    Arc::new(AppState::new(config, Arc::new(MemoryStore::new())))
}

async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, String) {
    let resp = build_router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_form(state: &Arc<AppState>, uri: &str, form: &str) -> (StatusCode, String) {
    let resp = build_router(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn index_lists_default_filter() {
    let state = test_state(5);
    let (status, html) = get(&state, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Toolsv1 - Free Online Tools | MicroToolsHub</title>"));
    assert_eq!(html.matches(r#"class="tool-card""#).count(), 6);
}

#[tokio::test]
async fn index_search_query() {
    let state = test_state(5);
    let (_, html) = get(&state, "/?filter=all&q=uppercase").await;
    assert!(html.contains("All Tools - Free Online Utilities"));
    assert_eq!(html.matches(r#"class="tool-card""#).count(), 1);
    assert!(html.contains(r#"data-tool-id="case-converter""#));
}

#[tokio::test]
async fn running_a_tool_shows_result_modal() {
    let state = test_state(5);
    let (status, html) = post_form(&state, "/tools/bullet-paragraph", "text=-+first%0A*+second%0A%E2%80%A2+third").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"id="resultModal""#));
    assert!(html.contains("Bullet to Paragraph Converter - Free Online Tool Result"));
    assert!(html.contains("first. second. third."));
}

#[tokio::test]
async fn case_converter_buttons_send_mode() {
    let state = test_state(5);
    let (status, html) = post_form(&state, "/tools/case-converter", "text=Shout&mode=upper").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(">SHOUT</div>"));
}

#[tokio::test]
async fn date_tool_form() {
    let state = test_state(5);
    let (status, html) = post_form(&state, "/tools/date-difference", "start=2024-01-01&end=2024-01-10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("• From: Monday, January 1, 2024"));
    assert!(html.contains("• Difference: 9 days"));
}

#[tokio::test]
async fn bad_input_is_unprocessable() {
    let state = test_state(5);
    let (status, html) = post_form(&state, "/tools/date-difference", "start=&end=2024-01-10").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(html.contains(r#"id="noticeModal""#));
    assert_eq!(state.tools.usage_report(microtools_hub::usage::today()).daily.used, 0);
}

#[tokio::test]
async fn unknown_tool_is_404() {
    let state = test_state(5);
    let (status, html) = post_form(&state, "/tools/spreadsheet", "text=x").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Tool not found: spreadsheet"));
}

#[tokio::test]
async fn limit_reached_is_429() {
    let state = test_state(1);
    let (status, _) = post_form(&state, "/tools/word-counter", "text=one").await;
    assert_eq!(status, StatusCode::OK);
    let (status, html) = post_form(&state, "/tools/word-counter", "text=two").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert!(html.contains("Daily free limit reached. Pro coming soon!"));
}

#[tokio::test]
async fn notify_form() {
    let state = test_state(5);
    let (status, html) = post_form(&state, "/notify", "name=&email=reader%40example.com&interest_pro=on").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Thank you! We&#39;ll notify you at reader@example.com"));

    let stored = state.notifications.list();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Anonymous");
    assert_eq!(stored[0].source, "notify_modal");
    assert_eq!(stored[0].interests, vec!["Pro plan launch".to_string()]);

    let (status, _) = post_form(&state, "/notify", "name=Bob&email=bob").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(state.notifications.list().len(), 1);
}

#[tokio::test]
async fn file_backed_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let config = AppConfig {
        storage_path: Some(path.clone()),
        ..AppConfig::default()
    };
    let state = Arc::new(AppState::from_config(config.clone()).unwrap());
    let (status, _) = post_form(&state, "/tools/text-cleaner", "text=a++b").await;
    assert_eq!(status, StatusCode::OK);

    let store = FileStore::open(&path).unwrap();
    let restarted = AppState::new(config, Arc::new(store));
    let report = restarted.tools.usage_report(microtools_hub::usage::today());
    assert_eq!(report.daily.used, 1);
    assert_eq!(report.tools.get("text-cleaner"), Some(&1));
}
