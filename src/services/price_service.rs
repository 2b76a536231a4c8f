use crate::cache::TtlCache;
use crate::config::PriceConfig;
use crate::error::FetchError;
use crate::types::{ChartSeries, PricePoint, TimePeriod};
use crate::utils::PriceCalculator;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const SPOT_PRICE_KEY: &str = "eth-current-price";

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// 价格服务
///
/// 价格源不受区块浏览器限流约束，直接请求。
pub struct PriceService {
    client: reqwest::Client,
    cache: Arc<TtlCache>,
    api_url: String,
    coin_id: String,
}

impl PriceService {
    pub fn new(config: &PriceConfig, cache: Arc<TtlCache>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            cache,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            coin_id: config.coin_id.clone(),
        })
    }

    /// 获取原生币当前美元价格
    pub async fn spot_price(&self) -> Result<f64, FetchError> {
        if let Some(price) = self.cache.get::<f64>(SPOT_PRICE_KEY) {
            return Ok(price);
        }

        let url = format!("{}/simple/price", self.api_url);
        let response = self
            .client
            .get(&url)
            .query(&[("ids", self.coin_id.as_str()), ("vs_currencies", "usd")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport {
                status: response.status().as_u16(),
            });
        }

        let body: HashMap<String, HashMap<String, f64>> = response.json().await?;
        let price = body
            .get(&self.coin_id)
            .and_then(|quotes| quotes.get("usd"))
            .copied()
            .ok_or_else(|| FetchError::decode(format!("价格响应中缺少 {} 的美元报价", self.coin_id)))?;

        if price <= 0.0 {
            return Err(FetchError::decode(format!("无效的价格数据: {}", price)));
        }

        debug!("💲 {} 当前价格: ${}", self.coin_id, price);
        self.cache.set(SPOT_PRICE_KEY, price);
        Ok(price)
    }

    /// 获取价格历史并计算盈亏
    ///
    /// 缓存的只是价格点；盈亏每次用调用方传入的当前持仓重新计算。
    /// 价格源始终按周期对应的固定天数请求，再在本地按截止时间过滤。
    pub async fn price_history(
        &self,
        period: TimePeriod,
        address: &str,
        holding: f64,
    ) -> Result<ChartSeries, FetchError> {
        let cache_key = TtlCache::key(&["eth-history", period.as_str(), address]);

        let points = match self.cache.get::<Vec<PricePoint>>(&cache_key) {
            Some(points) => points,
            None => {
                let prices = self.market_chart(period.lookback_days()).await?;
                let filtered = PriceCalculator::filter_by_period(&prices, period, Utc::now().timestamp_millis());
                let points = PriceCalculator::to_points(&filtered);
                info!("📈 {} 价格历史 ({}): {} 个数据点", self.coin_id, period, points.len());
                self.cache.set(cache_key, points.clone());
                points
            }
        };

        let profit_loss = PriceCalculator::profit_loss(&points, holding, period);
        Ok(ChartSeries { points, profit_loss })
    }

    async fn market_chart(&self, days: u32) -> Result<Vec<(i64, f64)>, FetchError> {
        let url = format!("{}/coins/{}/market_chart", self.api_url, self.coin_id);
        let days = days.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Transport {
                status: response.status().as_u16(),
            });
        }

        let body: MarketChartResponse = response.json().await?;
        Ok(body
            .prices
            .into_iter()
            .map(|(timestamp, price)| (timestamp as i64, price))
            .collect())
    }
}
