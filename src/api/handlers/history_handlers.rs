use super::super::ApiState;
use super::{or_fallback, ApiResponse};
use crate::types::*;
use crate::utils::PriceCalculator;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub period: Option<String>,
}

pub async fn get_recent_deposits(State(state): State<ApiState>) -> Json<Vec<DepositTransaction>> {
    let services = &state.services;
    let address = services.wallet.address();

    Json(or_fallback(
        "最近入账",
        services.history.recent_deposits(address).await,
        Vec::new,
    ))
}

/// 价格走势和盈亏
///
/// 持仓取当前原生币余额（余额不可用时按 0 计），价格源失败时返回确定性的占位序列
///
/// # 示例请求
/// ```text
/// GET /api/chart?period=1W
/// ```
pub async fn get_price_chart(
    Query(params): Query<ChartQuery>,
    State(state): State<ApiState>,
) -> Result<Json<ChartSeries>, (StatusCode, Json<ApiResponse<()>>)> {
    let period = match params.period.as_deref() {
        None => TimePeriod::default(),
        Some(raw) => raw
            .parse::<TimePeriod>()
            .map_err(|e| ApiResponse::error(StatusCode::BAD_REQUEST, e))?,
    };

    let services = &state.services;
    let address = services.wallet.address();

    let holding = or_fallback(
        "原生币余额",
        services.balances.native_balance(address).await,
        NativeBalance::fallback,
    )
    .holding();

    let series = or_fallback(
        "价格走势",
        services.prices.price_history(period, address, holding).await,
        || PriceCalculator::placeholder_series(period, holding, Utc::now().timestamp_millis()),
    );

    Ok(Json(series))
}
