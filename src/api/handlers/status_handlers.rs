use super::super::ApiState;
use axum::{extract::State, response::Json};
use serde_json::{json, Value};

/// 缓存状态（条目数包含尚未被读取淘汰的过期条目）
pub async fn get_cache_status(State(state): State<ApiState>) -> Json<Value> {
    let services = &state.services;

    Json(json!({
        "entries": services.cache.len(),
        "ttl_ms": services.cache.ttl().as_millis() as u64,
        "min_request_interval_ms": services.explorer.rate_limiter().min_interval().as_millis() as u64,
        "wallet": services.wallet.address(),
    }))
}
