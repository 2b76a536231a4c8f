use super::price_service::PriceService;
use crate::cache::TtlCache;
use crate::error::FetchError;
use crate::explorer::ExplorerClient;
use crate::types::{NativeBalance, PortfolioValue, TokenBalance};
use crate::utils::{AmountConverter, PriceCalculator, NATIVE_DECIMALS};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct BalanceService {
    explorer: Arc<ExplorerClient>,
    prices: Arc<PriceService>,
    cache: Arc<TtlCache>,
    token_contract: String,
    token_decimals: u32,
    fallback_price: f64,
}

impl BalanceService {
    pub fn new(
        explorer: Arc<ExplorerClient>,
        prices: Arc<PriceService>,
        cache: Arc<TtlCache>,
        token_contract: String,
        token_decimals: u32,
        fallback_price: f64,
    ) -> Self {
        Self {
            explorer,
            prices,
            cache,
            token_contract,
            token_decimals,
            fallback_price,
        }
    }

    /// 原生币余额：wei → ETH（6 位小数），并按现价折算美元
    pub async fn native_balance(&self, address: &str) -> Result<NativeBalance, FetchError> {
        let cache_key = TtlCache::key(&["eth-balance", address]);
        if let Some(cached) = self.cache.get::<NativeBalance>(&cache_key) {
            return Ok(cached);
        }

        let result = self
            .explorer
            .call(&[
                ("module", "account"),
                ("action", "balance"),
                ("address", address),
                ("tag", "latest"),
            ])
            .await?;

        let raw = result_as_string(&result)?;
        let amount = AmountConverter::raw_to_decimal(&raw, NATIVE_DECIMALS)?;

        let price = match self.prices.spot_price().await {
            Ok(price) => price,
            Err(e) => {
                warn!("获取现价失败，使用兜底价格 {}: {}", self.fallback_price, e);
                self.fallback_price
            }
        };

        let balance = NativeBalance {
            raw,
            formatted: AmountConverter::format_fixed(amount, 6),
            usd_value: AmountConverter::to_f64(amount) * price,
        };

        debug!("原生币余额 {}: {}", address, balance.formatted);
        self.cache.set(cache_key, balance.clone());
        Ok(balance)
    }

    /// 代币余额（USDC 与美元 1:1，日内变化恒为 0）
    pub async fn token_balance(&self, address: &str) -> Result<TokenBalance, FetchError> {
        let cache_key = TtlCache::key(&["usdc-balance", address]);
        if let Some(cached) = self.cache.get::<TokenBalance>(&cache_key) {
            return Ok(cached);
        }

        let result = self
            .explorer
            .call(&[
                ("module", "account"),
                ("action", "tokenbalance"),
                ("contractaddress", self.token_contract.as_str()),
                ("address", address),
                ("tag", "latest"),
            ])
            .await?;

        let raw = result_as_string(&result)?;
        let amount = AmountConverter::raw_to_decimal(&raw, self.token_decimals)?;

        let balance = TokenBalance {
            raw,
            formatted: AmountConverter::format_fixed(amount, 2),
            usd_value: AmountConverter::to_f64(amount),
            daily_change: 0.0,
            daily_change_percent: 0.0,
            is_profit: true,
        };

        debug!("代币余额 {}: {}", address, balance.formatted);
        self.cache.set(cache_key, balance.clone());
        Ok(balance)
    }

    /// 组合估值：并发获取原生币和代币余额后求和
    pub async fn portfolio_value(&self, address: &str) -> Result<PortfolioValue, FetchError> {
        let cache_key = TtlCache::key(&["portfolio", address]);
        if let Some(cached) = self.cache.get::<PortfolioValue>(&cache_key) {
            return Ok(cached);
        }

        let (native, token) = tokio::try_join!(self.native_balance(address), self.token_balance(address))?;
        let portfolio = PriceCalculator::portfolio_value(&native, &token);

        self.cache.set(cache_key, portfolio.clone());
        Ok(portfolio)
    }
}

fn result_as_string(result: &Value) -> Result<String, FetchError> {
    match result {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(FetchError::decode(format!("余额结果格式错误: {}", other))),
    }
}
