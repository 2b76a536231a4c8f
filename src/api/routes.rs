use super::{handlers, ApiState};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Wallet routes
        .route("/api/wallet", get(handlers::get_wallet_info))
        .route("/api/refresh", post(handlers::refresh_balances))

        // Balance routes
        .route("/api/balances/native", get(handlers::get_native_balance))
        .route("/api/balances/token", get(handlers::get_token_balance))
        .route("/api/portfolio", get(handlers::get_portfolio))

        // History routes
        .route("/api/deposits", get(handlers::get_recent_deposits))
        .route("/api/chart", get(handlers::get_price_chart))

        // Transfer routes
        .route("/api/transfer", post(handlers::send_token))
        .route("/api/gas-estimate", get(handlers::get_gas_estimate))
        .route("/api/validate-address", get(handlers::validate_address))

        // Status routes
        .route("/api/status/cache", get(handlers::get_cache_status))

        .layer(CorsLayer::permissive())
        .with_state(state)
}
