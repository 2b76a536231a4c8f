//! 错误类型
//!
//! 读取路径统一返回 `FetchError`，由展示边界决定是否替换为兜底值；
//! 写入路径（代币转账）返回 `TransferError`，最终以结构化结果暴露给调用方。

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP 请求失败，状态码: {status}")]
    Transport { status: u16 },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimitExceeded,

    #[error("接口返回错误: {message}")]
    Provider { message: String },

    #[error("网络错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("响应解析失败: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn decode(message: impl Into<String>) -> Self {
        FetchError::Decode(message.into())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// 提交交易前的本地校验错误，任何网络调用之前触发
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid recipient address")]
    InvalidAddress,

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient USDC balance")]
    InsufficientBalance,
}

#[derive(Error, Debug)]
pub enum TransferError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotConfigured(String),

    #[error("链上调用失败: {0}")]
    Chain(String),
}
