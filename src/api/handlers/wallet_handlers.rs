use super::super::ApiState;
use super::or_fallback;
use crate::services::transfer_service::is_valid_address;
use crate::types::*;
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct GasEstimateQuery {
    pub to: String,
    pub amount: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: String,
}

pub async fn get_wallet_info(State(state): State<ApiState>) -> Json<WalletInfo> {
    let wallet = &state.services.wallet;

    Json(or_fallback("钱包信息", wallet.wallet_info().await, || {
        WalletInfo::new(wallet.name(), wallet.address(), None)
    }))
}

/// 失效缓存并返回刷新后的余额
pub async fn refresh_balances(State(state): State<ApiState>) -> Json<FreshBalances> {
    Json(or_fallback(
        "刷新余额",
        state.services.wallet.fetch_fresh_balances().await,
        FreshBalances::fallback,
    ))
}

/// 发送代币；失败时返回 `{"success": false, "error": ...}`
pub async fn send_token(
    State(state): State<ApiState>,
    Json(request): Json<TransferRequest>,
) -> Json<TransactionResult> {
    Json(
        state
            .services
            .transfers
            .send_token(&request.to, &request.amount)
            .await,
    )
}

pub async fn get_gas_estimate(
    Query(params): Query<GasEstimateQuery>,
    State(state): State<ApiState>,
) -> Json<Option<GasEstimate>> {
    let amount = params.amount.as_deref().unwrap_or("0");

    match state.services.transfers.estimate_gas(&params.to, amount).await {
        Ok(estimate) => Json(Some(estimate)),
        Err(e) => {
            warn!("Gas 估算失败: {}", e);
            Json(None)
        }
    }
}

/// 收款地址实时校验，只做本地格式检查
pub async fn validate_address(Query(params): Query<AddressQuery>) -> Json<bool> {
    Json(is_valid_address(&params.address))
}
