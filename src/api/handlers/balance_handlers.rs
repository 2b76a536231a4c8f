use super::super::ApiState;
use super::or_fallback;
use crate::types::*;
use axum::{extract::State, response::Json};

pub async fn get_native_balance(State(state): State<ApiState>) -> Json<NativeBalance> {
    let services = &state.services;
    let address = services.wallet.address();

    Json(or_fallback(
        "原生币余额",
        services.balances.native_balance(address).await,
        NativeBalance::fallback,
    ))
}

pub async fn get_token_balance(State(state): State<ApiState>) -> Json<TokenBalance> {
    let services = &state.services;
    let address = services.wallet.address();

    Json(or_fallback(
        "代币余额",
        services.balances.token_balance(address).await,
        TokenBalance::fallback,
    ))
}

pub async fn get_portfolio(State(state): State<ApiState>) -> Json<PortfolioValue> {
    let services = &state.services;
    let address = services.wallet.address();

    Json(or_fallback(
        "组合估值",
        services.balances.portfolio_value(address).await,
        PortfolioValue::fallback,
    ))
}
