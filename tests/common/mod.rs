#![allow(dead_code)]

use serde_json::{json, Value};
use wallet_dashboard::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WALLET: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";
pub const SENDER: &str = "0x9999999999999999999999999999999999999999";

/// 指向本地 mock 服务的配置，缩短限流间隔以加快测试
pub fn test_config(explorer: &MockServer, prices: &MockServer) -> Config {
    let mut config = Config::for_wallet(WALLET);
    config.explorer.api_url = format!("{}/api", explorer.uri());
    config.explorer.api_key = "test-key".to_string();
    config.explorer.min_interval_ms = 10;
    config.explorer.retry_backoff_ms = 10;
    config.price.api_url = prices.uri();
    config
}

pub fn explorer_ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "1",
        "message": "OK",
        "result": result
    }))
}

pub fn explorer_error(message: &str, result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "status": "0",
        "message": message,
        "result": result
    }))
}

pub async fn mount_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("action", action))
        .respond_with(response)
        .mount(server)
        .await;
}

pub async fn mount_spot_price(server: &MockServer, price: f64) {
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ethereum": { "usd": price }
        })))
        .mount(server)
        .await;
}

pub fn transfer_record(hash: &str, to: &str, value: &str, block: u64) -> Value {
    json!({
        "blockNumber": block.to_string(),
        "timeStamp": "1700000000",
        "hash": hash,
        "from": SENDER,
        "contractAddress": "0x1c7d4b196cb0c7b01d743fbc6116a902379c7238",
        "to": to,
        "value": value,
        "tokenName": "USDC",
        "tokenSymbol": "USDC",
        "tokenDecimal": "6",
        "confirmations": "1"
    })
}
