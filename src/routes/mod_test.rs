use super::*;
use crate::earthengine::UnconfiguredSource;
use crate::services::analysis::AnalysisError;
use crate::services::notice::{FALLBACK_MESSAGE, NoticeBoard};
use crate::state::test_helpers::{self, GatedSource};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

async fn serve(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_app() -> String {
    serve(AppState::new(Arc::new(UnconfiguredSource::missing_key("EE_API_KEY_ENV")), NoticeBoard::default())).await
}

#[test]
fn api_error_carries_code_and_message() {
    let err = ApiError::new(StatusCode::CONFLICT, &AnalysisError::Busy);
    assert_eq!(err.body.error, "E_ANALYSIS_BUSY");
    assert_eq!(err.body.message, "an analysis is already in progress");
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn healthz_ok() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn analysis_without_region_is_unprocessable() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client.post(format!("{base}/api/analysis")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "E_NO_REGION");

    let notices: Value = client
        .get(format!("{base}/api/notices"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notices[0]["message"], "Please draw an area first");
}

#[tokio::test]
async fn draw_analyze_and_fetch_timeline() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/api/region"))
        .json(&json!({ "sw": { "lat": -4.0, "lng": -63.0 }, "ne": { "lat": -3.0, "lng": -62.0 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);

    let report: Value = client
        .post(format!("{base}/api/analysis"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["provenance"]["kind"], "fallback");
    assert_eq!(report["dataset"]["years"], json!([2018, 2019, 2020, 2021, 2022, 2023]));

    let rendered: Value = client
        .get(format!("{base}/api/timeline"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rendered["figure"]["layout"]["yaxis2"]["side"], "right");

    let status: Value = client
        .get(format!("{base}/api/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status, json!({ "loading": false, "analysis_in_progress": false, "has_region": true }));
}

#[tokio::test]
async fn invalid_region_is_bad_request() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .put(format!("{base}/api/region"))
        .json(&json!({ "sw": { "lat": -3.0, "lng": -62.0 }, "ne": { "lat": -4.0, "lng": -63.0 } }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "E_INVERTED_CORNERS");
}

#[tokio::test]
async fn malformed_region_body_is_json_bad_request() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .put(format!("{base}/api/region"))
        .json(&json!({ "center": [0, 0] }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 400);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("application/json"), "{content_type}");
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "E_REGION_BODY");
    assert!(body["message"].as_str().unwrap().contains("invalid region body"));
}

#[tokio::test]
async fn analysis_finishes_after_client_disconnects() {
    let source = Arc::new(GatedSource::default());
    let (state, renderer) = test_helpers::test_app_state_with_region(source.clone()).await;
    let base = serve(state.clone()).await;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();
    let request = tokio::spawn(async move { client.post(format!("{base}/api/analysis")).send().await });

    tokio::time::timeout(Duration::from_secs(2), source.entered.notified())
        .await
        .expect("run should reach the source");
    assert!(request.await.unwrap().is_err(), "client should give up before the source answers");
    assert!(state.analysis_in_progress());

    source.release.notify_one();
    tokio::time::timeout(Duration::from_secs(2), async {
        while state.analysis_in_progress() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("run should complete without a client");

    let renders = renderer.renders();
    assert_eq!(renders.len(), 1);
    assert!(renders[0].1.is_fallback());
    let notices = state.notices.recent();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, FALLBACK_MESSAGE);
    assert!(!state.loading.is_visible());
}
