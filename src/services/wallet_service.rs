use super::balance_service::BalanceService;
use super::history_service::HistoryService;
use crate::cache::TtlCache;
use crate::config::WalletConfig;
use crate::error::FetchError;
use crate::types::{FreshBalances, WalletInfo};
use std::sync::Arc;
use tracing::info;

/// 单钱包视图：钱包信息和刷新入口
pub struct WalletService {
    name: String,
    address: String,
    cache: Arc<TtlCache>,
    balances: Arc<BalanceService>,
    history: Arc<HistoryService>,
}

impl WalletService {
    pub fn new(
        config: &WalletConfig,
        cache: Arc<TtlCache>,
        balances: Arc<BalanceService>,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            name: config.name.clone(),
            address: config.address.clone(),
            cache,
            balances,
            history,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn wallet_info(&self) -> Result<WalletInfo, FetchError> {
        let joined = self.history.first_transaction_date(&self.address).await?;
        Ok(WalletInfo::new(&self.name, &self.address, joined.as_deref()))
    }

    /// 使该钱包的全部缓存失效，下一次读取会重新请求
    pub fn refresh(&self) {
        info!("🔄 刷新钱包缓存: {}", self.address);
        self.cache.invalidate(Some(&self.address));
    }

    /// 失效后立即重新获取余额和组合估值，保证返回的是最新数据
    pub async fn fetch_fresh_balances(&self) -> Result<FreshBalances, FetchError> {
        self.refresh();

        let (balance, portfolio) = tokio::try_join!(
            self.balances.token_balance(&self.address),
            self.balances.portfolio_value(&self.address)
        )?;

        Ok(FreshBalances { balance, portfolio })
    }
}
