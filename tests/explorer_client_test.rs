mod common;

use common::*;
use serde_json::json;
use std::time::{Duration, Instant};
use wallet_dashboard::explorer::ExplorerClient;
use wallet_dashboard::FetchError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(explorer: &MockServer) -> ExplorerClient {
    let prices = MockServer::start().await;
    let config = test_config(explorer, &prices);
    ExplorerClient::new(&config.explorer).unwrap()
}

#[tokio::test]
async fn test_attaches_chain_and_key() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("chainid", "11155111"))
        .and(query_param("apikey", "test-key"))
        .and(query_param("module", "account"))
        .and(query_param("action", "balance"))
        .respond_with(explorer_ok(json!("42")))
        .expect(1)
        .mount(&explorer)
        .await;

    let client = client_for(&explorer).await;
    let result = client
        .call(&[("module", "account"), ("action", "balance"), ("address", WALLET)])
        .await
        .unwrap();
    assert_eq!(result, json!("42"));
}

#[tokio::test]
async fn test_rate_limited_retries_then_fails() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(explorer_error("NOTOK", json!("Max calls per sec rate limit reached (3/sec)")))
        // 首次请求 + 2 次重试
        .expect(3)
        .mount(&explorer)
        .await;

    let client = client_for(&explorer).await;
    let err = client
        .call(&[("module", "account"), ("action", "balance")])
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::RateLimitExceeded));
}

#[tokio::test]
async fn test_rate_limited_then_recovers() {
    let explorer = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(explorer_error("NOTOK", json!("Max rate limit reached")))
        .up_to_n_times(1)
        .mount(&explorer)
        .await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(explorer_ok(json!("7")))
        .mount(&explorer)
        .await;

    let client = client_for(&explorer).await;
    let result = client
        .call(&[("module", "account"), ("action", "balance")])
        .await
        .unwrap();
    assert_eq!(result, json!("7"));
}

#[tokio::test]
async fn test_default_backoff_between_retries() {
    let explorer = MockServer::start().await;
    let prices = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(explorer_error("NOTOK", json!("Max rate limit reached")))
        .expect(3)
        .mount(&explorer)
        .await;

    let mut config = test_config(&explorer, &prices);
    config.explorer.retry_backoff_ms = 1000;
    let client = ExplorerClient::new(&config.explorer).unwrap();

    let start = Instant::now();
    let err = client.call(&[("action", "balance")]).await.unwrap_err();
    assert!(matches!(err, FetchError::RateLimitExceeded));
    assert!(start.elapsed() >= Duration::from_millis(2000));
}

#[tokio::test]
async fn test_no_transactions_found_is_empty_success() {
    let explorer = MockServer::start().await;
    mount_action(&explorer, "txlist", explorer_error("No transactions found", json!([]))).await;

    let client = client_for(&explorer).await;
    let result = client
        .call(&[("module", "account"), ("action", "txlist")])
        .await
        .unwrap();
    assert_eq!(result, json!([]));
}

#[tokio::test]
async fn test_provider_error() {
    let explorer = MockServer::start().await;
    mount_action(&explorer, "balance", explorer_error("NOTOK", json!("Invalid API Key"))).await;

    let client = client_for(&explorer).await;
    let err = client.call(&[("action", "balance")]).await.unwrap_err();
    match err {
        FetchError::Provider { message } => assert_eq!(message, "Invalid API Key"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_proxy_rpc_error() {
    let explorer = MockServer::start().await;
    mount_action(
        &explorer,
        "eth_blockNumber",
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32000, "message": "upstream unavailable" }
        })),
    )
    .await;

    let client = client_for(&explorer).await;
    let err = client
        .call(&[("module", "proxy"), ("action", "eth_blockNumber")])
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Provider { .. }));
}

#[tokio::test]
async fn test_transport_error_status() {
    let explorer = MockServer::start().await;
    mount_action(&explorer, "balance", ResponseTemplate::new(502)).await;

    let client = client_for(&explorer).await;
    let err = client.call(&[("action", "balance")]).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport { status: 502 }));
}

#[tokio::test]
async fn test_back_to_back_calls_are_spaced() {
    let explorer = MockServer::start().await;
    let prices = MockServer::start().await;
    mount_action(&explorer, "balance", explorer_ok(json!("1"))).await;

    let mut config = test_config(&explorer, &prices);
    config.explorer.min_interval_ms = 350;
    let client = ExplorerClient::new(&config.explorer).unwrap();

    let start = Instant::now();
    for _ in 0..4 {
        client.call(&[("action", "balance")]).await.unwrap();
    }
    assert!(start.elapsed() >= Duration::from_millis(3 * 350));
}

#[tokio::test]
async fn test_retries_respect_spacing_floor() {
    let explorer = MockServer::start().await;
    let prices = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(explorer_error("NOTOK", json!("Max rate limit reached")))
        .mount(&explorer)
        .await;

    let mut config = test_config(&explorer, &prices);
    config.explorer.min_interval_ms = 200;
    config.explorer.retry_backoff_ms = 0;
    let client = ExplorerClient::new(&config.explorer).unwrap();

    let start = Instant::now();
    let _ = client.call(&[("action", "balance")]).await;
    assert!(start.elapsed() >= Duration::from_millis(2 * 200));
}
