pub mod balance_handlers;
pub mod history_handlers;
pub mod status_handlers;
pub mod wallet_handlers;

pub use balance_handlers::*;
pub use history_handlers::*;
pub use status_handlers::*;
pub use wallet_handlers::*;

use crate::error::FetchError;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

impl ApiResponse<()> {
    pub fn error(status: StatusCode, message: String) -> (StatusCode, Json<Self>) {
        let response = Self {
            success: false,
            data: None,
            message: Some(message),
        };
        (status, Json(response))
    }
}

/// 展示边界的兜底策略：取数失败时记录错误并返回该组件的兜底值，
/// 单个组件失败不影响整个页面
fn or_fallback<T>(widget: &str, result: Result<T, FetchError>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("⚠️ {} 获取失败，使用兜底数据: {}", widget, e);
            fallback()
        }
    }
}
