// File: crates/agentchart-fetch/tests/render.rs
// Purpose: End-to-end renders against an in-process metrics server: success path,
// uniform error policy, timeout, cancellation and detached targets.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use agentchart_core::{ChartConfig, Color, Overflow};
use agentchart_fetch::{ChartError, ChartRenderer, ErrorKind, GraphClient, MemoryTarget, RenderState, RenderTarget};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use reqwest::Url;
use serde_json::json;

async fn serve(app: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

fn renderer(base: Url, timeout: Duration) -> ChartRenderer {
    ChartRenderer::new(GraphClient::new(base, timeout).unwrap())
}

fn fill() -> Color {
    Color::rgb(0x31, 0x82, 0xbd)
}

async fn series_app(body: &'static str) -> Url {
    serve(Router::new().route(
        "/fetch/agent/graph/:uid/:datapoint",
        get(move || async move { ([("content-type", "application/json")], body) }),
    ))
    .await
}

async fn stacked_app(body: serde_json::Value) -> Url {
    serve(Router::new().route(
        "/fetch/agent/graph/stacked/:uid/:datapoint",
        get(move || {
            let body = body.clone();
            async move { axum::Json(body) }
        }),
    ))
    .await
}

#[tokio::test]
async fn area_chart_is_appended() {
    let base = series_app(r#"[{"x":1000,"y":5},{"x":2000,"y":0},{"x":3000,"y":10}]"#).await;
    let target = Arc::new(MemoryTarget::new());
    let handle = renderer(base, Duration::from_secs(5)).area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill());

    handle.wait().await.expect("render");

    let charts = target.charts();
    assert_eq!(charts.len(), 1);
    let svg = &charts[0];
    assert!(svg.contains(r#"class="center-block""#));
    assert!(svg.contains(r#"<path class="area""#));
    assert!(svg.contains(r#"<path class="line""#));
    assert!(svg.contains(">Data</text>"));
}

#[tokio::test]
async fn state_reaches_rendered() {
    let base = series_app(r#"[{"x":1000,"y":5},{"x":2000,"y":7}]"#).await;
    let target = Arc::new(MemoryTarget::new());
    let handle = renderer(base, Duration::from_secs(5)).area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill());
    assert_ne!(handle.state(), RenderState::Failed);

    assert_eq!(handle.settled().await, RenderState::Rendered);
    assert_eq!(handle.state(), RenderState::Rendered);
    handle.wait().await.unwrap();
}

#[tokio::test]
async fn repeated_renders_append_again() {
    let base = series_app(r#"[{"x":1000,"y":5},{"x":2000,"y":7}]"#).await;
    let target = Arc::new(MemoryTarget::new());
    let r = renderer(base, Duration::from_secs(5));
    for _ in 0..2 {
        r.area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill()).wait().await.unwrap();
    }
    assert_eq!(target.len(), 2);
}

#[tokio::test]
async fn stacked_memory_uses_fixed_palette() {
    let base = stacked_app(json!([
        {"x": 1, "y": 2e10, "group": "a"},
        {"x": 1, "y": 3e10, "group": "b"},
        {"x": 2, "y": 1e10, "group": "a"},
        {"x": 2, "y": null, "group": "b"}
    ]))
    .await;
    let target = Arc::new(MemoryTarget::new());
    let handle = renderer(base, Duration::from_secs(5)).stacked_area(
        ChartConfig::new("u1", "memory"),
        target.clone(),
        Some(vec![Color::rgb(0, 0, 0)]),
    );
    handle.wait().await.expect("render");

    let svg = &target.charts()[0];
    assert_eq!(svg.matches(r#"<path class="layer""#).count(), 2);
    assert!(svg.contains(r##"fill="#71d5c3""##));
    assert!(svg.contains(r##"fill="#009db2""##));
    assert!(!svg.contains(r##"fill="#000000""##));
}

#[tokio::test]
async fn palette_error_policy_fails_the_render() {
    let base = stacked_app(json!([
        {"x": 1, "y": 1, "group": "a"},
        {"x": 1, "y": 1, "group": "b"},
        {"x": 1, "y": 1, "group": "c"},
        {"x": 1, "y": 1, "group": "d"}
    ]))
    .await;
    let target = Arc::new(MemoryTarget::new());
    let err = renderer(base, Duration::from_secs(5))
        .with_overflow(Overflow::Error)
        .stacked_area(ChartConfig::new("u1", "load"), target.clone(), None)
        .wait()
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DataShape);
    assert!(target.is_empty());
}

#[tokio::test]
async fn not_found_is_a_network_error() {
    let base = serve(Router::new().route(
        "/fetch/agent/graph/:uid/:datapoint",
        get(|| async { (StatusCode::NOT_FOUND, "no such agent").into_response() }),
    ))
    .await;
    let target = Arc::new(MemoryTarget::new());
    let handle = renderer(base, Duration::from_secs(5)).area_chart(ChartConfig::new("gone", "cpu"), target.clone(), fill());
    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, ChartError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(target.is_empty());
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    let target = Arc::new(MemoryTarget::new());
    let err = renderer(base, Duration::from_secs(5))
        .area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill())
        .wait()
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::Network { .. }));
    assert!(target.is_empty());
}

#[tokio::test]
async fn malformed_payloads_are_data_shape_errors() {
    for body in [r#"{"not":"an array"}"#, r#"[{"x":"soon","y":1}]"#, "[1,2,"] {
        let base = series_app(body).await;
        let target = Arc::new(MemoryTarget::new());
        let err = renderer(base, Duration::from_secs(5))
            .area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill())
            .wait()
            .await
            .unwrap_err();
        assert!(matches!(err, ChartError::DataShape { .. }), "{body}: {err}");
        assert_eq!(err.kind(), ErrorKind::DataShape);
        assert!(target.is_empty());
    }
}

#[tokio::test]
async fn missing_group_is_rejected() {
    let base = stacked_app(json!([{"x": 1, "y": 2, "group": "a"}, {"x": 1, "y": 3}])).await;
    let target = Arc::new(MemoryTarget::new());
    let err = renderer(base, Duration::from_secs(5))
        .stacked_area(ChartConfig::new("u1", "cpu"), target.clone(), None)
        .wait()
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::DataShape { .. }));
    assert!(target.is_empty());
}

#[tokio::test]
async fn empty_series_is_a_layout_error() {
    let base = series_app("[]").await;
    let target = Arc::new(MemoryTarget::new());
    let err = renderer(base, Duration::from_secs(5))
        .area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill())
        .wait()
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::Layout(_)));
    assert_eq!(err.kind(), ErrorKind::DataShape);
    assert!(target.is_empty());
}

async fn slow_app(delay: Duration) -> Url {
    serve(Router::new().route(
        "/fetch/agent/graph/:uid/:datapoint",
        get(move || async move {
            tokio::time::sleep(delay).await;
            axum::Json(json!([{"x": 1, "y": 1}, {"x": 2, "y": 2}]))
        }),
    ))
    .await
}

#[tokio::test]
async fn slow_server_times_out() {
    let base = slow_app(Duration::from_secs(3)).await;
    let target = Arc::new(MemoryTarget::new());
    let err = renderer(base, Duration::from_millis(200))
        .area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill())
        .wait()
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::Timeout { .. }));
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(target.is_empty());
}

#[tokio::test]
async fn cancel_aborts_in_flight_fetch() {
    let base = slow_app(Duration::from_secs(3)).await;
    let target = Arc::new(MemoryTarget::new());
    let handle = renderer(base, Duration::from_secs(10)).area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill());

    tokio::time::sleep(Duration::from_millis(50)).await;
    let started = tokio::time::Instant::now();
    handle.cancel();
    assert_eq!(handle.settled().await, RenderState::Failed);
    let err = handle.wait().await.unwrap_err();

    assert!(matches!(err, ChartError::Cancelled));
    assert_eq!(err.kind(), ErrorKind::Aborted);
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(target.is_empty());
}

#[tokio::test]
async fn dropped_handle_keeps_rendering() {
    let base = slow_app(Duration::from_millis(100)).await;
    let target = Arc::new(MemoryTarget::new());
    drop(renderer(base, Duration::from_secs(5)).area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill()));

    for _ in 0..200 {
        if !target.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(target.len(), 1);
}

#[tokio::test]
async fn detached_target_receives_nothing() {
    let base = slow_app(Duration::from_millis(200)).await;
    let target = Arc::new(MemoryTarget::new());
    let handle = renderer(base, Duration::from_secs(5)).area_chart(ChartConfig::new("u1", "cpu"), target.clone(), fill());
    target.detach();
    assert!(!target.is_attached());

    let err = handle.wait().await.unwrap_err();
    assert!(matches!(err, ChartError::Detached));
    assert_eq!(err.kind(), ErrorKind::Aborted);
    assert!(target.is_empty());
}

#[tokio::test]
async fn path_segments_arrive_decoded() {
    let seen: Arc<Mutex<Vec<(String, String)>>> = Arc::default();
    let log = seen.clone();
    let base = serve(Router::new().route(
        "/fetch/agent/graph/:uid/:datapoint",
        get(move |Path((uid, datapoint)): Path<(String, String)>| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push((uid, datapoint));
                axum::Json(json!([{"x": 1, "y": 1}, {"x": 2, "y": 3}]))
            }
        }),
    ))
    .await;

    let target = Arc::new(MemoryTarget::new());
    renderer(base, Duration::from_secs(5))
        .area_chart(ChartConfig::new("web 01/a", "disk?io"), target.clone(), fill())
        .wait()
        .await
        .unwrap();

    assert_eq!(seen.lock().unwrap().as_slice(), [("web 01/a".to_string(), "disk?io".to_string())]);
}

#[tokio::test]
async fn dot_segment_uid_never_reaches_the_server() {
    let hits: Arc<Mutex<usize>> = Arc::default();
    let count = hits.clone();
    let base = serve(Router::new().route(
        "/fetch/agent/graph/:uid/:datapoint",
        get(move || {
            let count = count.clone();
            async move {
                *count.lock().unwrap() += 1;
                axum::Json(json!([{"x": 1, "y": 1}, {"x": 2, "y": 3}]))
            }
        }),
    ))
    .await;

    let target = Arc::new(MemoryTarget::new());
    let err = renderer(base, Duration::from_secs(5))
        .stacked_area(ChartConfig::new("..", "memory"), target.clone(), None)
        .wait()
        .await
        .unwrap_err();
    assert!(matches!(err, ChartError::Config(_)));
    assert_eq!(*hits.lock().unwrap(), 0);
    assert!(target.is_empty());
}
