use super::rate_limiter::RateLimiter;
use super::responses::ExplorerResponse;
use crate::config::ExplorerConfig;
use crate::error::FetchError;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// 带限流和重试的区块浏览器客户端
///
/// 单一入口 `call`，按 `module`/`action` 参数区分接口，
/// 每次请求自动附带 `chainid` 和 `apikey`。
pub struct ExplorerClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    api_url: String,
    api_key: String,
    chain_id: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl ExplorerClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.min_interval()),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            chain_id: config.chain_id.to_string(),
            max_retries: config.max_retries,
            retry_backoff: config.retry_backoff(),
        })
    }

    /// 发起一次浏览器查询
    ///
    /// 每次尝试（包括重试）都会经过限流器；
    /// 接口层面的限流响应按固定间隔重试 `max_retries` 次，耗尽后返回 `RateLimitExceeded`。
    pub async fn call(&self, params: &[(&str, &str)]) -> Result<Value, FetchError> {
        let action = params
            .iter()
            .find(|(k, _)| *k == "action")
            .map(|(_, v)| *v)
            .unwrap_or("unknown");

        let mut attempt: u32 = 0;
        loop {
            self.rate_limiter.acquire().await;
            debug!("区块浏览器请求: action={} attempt={}", action, attempt + 1);

            let response = self.dispatch(params).await?;

            if !response.is_rate_limited() {
                return Self::into_result(response);
            }

            if attempt >= self.max_retries {
                warn!("❌ 区块浏览器限流，重试 {} 次后放弃: action={}", attempt, action);
                return Err(FetchError::RateLimitExceeded);
            }

            attempt += 1;
            warn!(
                "⏳ 区块浏览器限流 (action={})，{:?} 后第 {} 次重试",
                action, self.retry_backoff, attempt
            );
            tokio::time::sleep(self.retry_backoff).await;
        }
    }

    async fn dispatch(&self, params: &[(&str, &str)]) -> Result<ExplorerResponse, FetchError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("chainid", self.chain_id.as_str()), ("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                status: status.as_u16(),
            });
        }

        let body: ExplorerResponse = response.json().await?;
        Ok(body)
    }

    fn into_result(response: ExplorerResponse) -> Result<Value, FetchError> {
        if response.is_empty_result() {
            return Ok(Value::Array(Vec::new()));
        }

        if response.is_error_status() {
            let message = response
                .result_text()
                .filter(|r| !r.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| "EtherScan API error".to_string());
            return Err(FetchError::Provider { message });
        }

        if let Some(error) = response.error {
            return Err(FetchError::Provider {
                message: error.message,
            });
        }

        Ok(response.result)
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}
