pub mod api_service;
pub mod balance_service;
pub mod history_service;
pub mod price_service;
pub mod transfer_service;
pub mod wallet_service;

pub use api_service::ApiService;
pub use balance_service::BalanceService;
pub use history_service::HistoryService;
pub use price_service::PriceService;
pub use transfer_service::TransferService;
pub use wallet_service::WalletService;

use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::FetchError;
use crate::explorer::ExplorerClient;
use std::sync::Arc;

/// 数据访问层的全部服务
///
/// 缓存和限流状态归这个实例所有，随实例创建和销毁，不是进程级单例。
#[derive(Clone)]
pub struct DashboardServices {
    pub cache: Arc<TtlCache>,
    pub explorer: Arc<ExplorerClient>,
    pub prices: Arc<PriceService>,
    pub balances: Arc<BalanceService>,
    pub history: Arc<HistoryService>,
    pub transfers: Arc<TransferService>,
    pub wallet: Arc<WalletService>,
}

impl DashboardServices {
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let cache = Arc::new(TtlCache::new(config.cache.ttl()));
        let explorer = Arc::new(ExplorerClient::new(&config.explorer)?);
        let prices = Arc::new(PriceService::new(&config.price, Arc::clone(&cache))?);

        let balances = Arc::new(BalanceService::new(
            Arc::clone(&explorer),
            Arc::clone(&prices),
            Arc::clone(&cache),
            config.chain.token_contract.clone(),
            config.chain.token_decimals,
            config.price.fallback_price,
        ));

        let history = Arc::new(HistoryService::new(
            Arc::clone(&explorer),
            Arc::clone(&cache),
            config.chain.token_contract.clone(),
            config.chain.token_decimals,
        ));

        let transfers = Arc::new(TransferService::new(config, Arc::clone(&cache), Arc::clone(&prices)));

        let wallet = Arc::new(WalletService::new(
            &config.wallet,
            Arc::clone(&cache),
            Arc::clone(&balances),
            Arc::clone(&history),
        ));

        Ok(Self {
            cache,
            explorer,
            prices,
            balances,
            history,
            transfers,
            wallet,
        })
    }
}
