mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use wallet_dashboard::api::{create_router, ApiState};
use wallet_dashboard::DashboardServices;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 两个上游都返回 500 的路由
async fn failing_router() -> (MockServer, MockServer, axum::Router) {
    let explorer = MockServer::start().await;
    let prices = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&explorer)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&prices)
        .await;

    let services = DashboardServices::from_config(&test_config(&explorer, &prices)).unwrap();
    (explorer, prices, create_router(ApiState::new(services)))
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_native_balance_fallback() {
    let (_explorer, _prices, router) = failing_router().await;

    let (status, body) = get_json(router, "/api/balances/native").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["raw"], "0");
    assert_eq!(body["formatted"], "0.000000");
    assert_eq!(body["usd_value"], 0.0);
}

#[tokio::test]
async fn test_token_and_portfolio_fallback() {
    let (_explorer, _prices, router) = failing_router().await;

    let (_, token) = get_json(router.clone(), "/api/balances/token").await;
    assert_eq!(token["formatted"], "0.00");
    assert_eq!(token["daily_change"], 0.0);

    let (_, portfolio) = get_json(router, "/api/portfolio").await;
    assert_eq!(portfolio["total_value"], 0.0);
    assert_eq!(portfolio["native_balance"], "0");
}

#[tokio::test]
async fn test_deposits_fallback_is_empty() {
    let (_explorer, _prices, router) = failing_router().await;

    let (status, body) = get_json(router, "/api/deposits").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_wallet_info_fallback() {
    let (_explorer, _prices, router) = failing_router().await;

    let (_, body) = get_json(router, "/api/wallet").await;
    assert_eq!(body["address"], WALLET);
    assert_eq!(body["joined_date"], "Joined Nov 2025");
}

#[tokio::test]
async fn test_chart_fallback_is_placeholder_series() {
    let (_explorer, _prices, router) = failing_router().await;

    let (status, body) = get_json(router, "/api/chart?period=1W").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"].as_array().unwrap().len(), 48);
    assert_eq!(body["profit_loss"]["period_label"], "Past Week");
    // 持仓不可用时按 0 计
    assert_eq!(body["profit_loss"]["amount"], 0.0);
}

#[tokio::test]
async fn test_chart_defaults_to_six_hours() {
    let (_explorer, _prices, router) = failing_router().await;

    let (status, body) = get_json(router, "/api/chart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["points"].as_array().unwrap().len(), 36);
    assert_eq!(body["profit_loss"]["period_label"], "Past 6 Hours");
}

#[tokio::test]
async fn test_validate_address() {
    let (_explorer, _prices, router) = failing_router().await;

    let (status, body) = get_json(router.clone(), &format!("/api/validate-address?address={}", WALLET)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (_, body) = get_json(router, "/api/validate-address?address=0x1234").await;
    assert_eq!(body, json!(false));
}

#[tokio::test]
async fn test_chart_rejects_unknown_period() {
    let (_explorer, _prices, router) = failing_router().await;

    let (status, body) = get_json(router, "/api/chart?period=2Y").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_transfer_surfaces_validation_error() {
    let (_explorer, _prices, router) = failing_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/transfer")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "to": "0x1234", "amount": "5" }).to_string()))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid recipient address");
}

#[tokio::test]
async fn test_cache_status() {
    let (_explorer, _prices, router) = failing_router().await;

    let (_, body) = get_json(router, "/api/status/cache").await;
    assert_eq!(body["entries"], 0);
    assert_eq!(body["ttl_ms"], 60_000);
    assert_eq!(body["wallet"], WALLET);
}
