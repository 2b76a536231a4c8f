//! 价格计算工具
//!
//! 价格历史 → 盈亏、余额 → 组合估值，以及价格源不可用时的占位序列

use crate::types::{
    ChartSeries, NativeBalance, PortfolioValue, PricePoint, ProfitLoss, TimePeriod, TokenBalance,
};

const PLACEHOLDER_BASE_PRICE: f64 = 3500.0;
const PLACEHOLDER_FLOOR_PRICE: f64 = 3000.0;

/// 价格计算工具
pub struct PriceCalculator;

impl PriceCalculator {
    /// 按周期截止时间过滤价格，截止时间点本身保留
    ///
    /// # 参数
    /// * `prices` - (毫秒时间戳, 价格)，按时间升序
    /// * `period` - 时间周期，`All` 不做过滤
    /// * `now_ms` - 当前毫秒时间戳
    pub fn filter_by_period(prices: &[(i64, f64)], period: TimePeriod, now_ms: i64) -> Vec<(i64, f64)> {
        match period.cutoff() {
            None => prices.to_vec(),
            Some(window) => {
                let cutoff = now_ms - window.num_milliseconds();
                prices
                    .iter()
                    .filter(|(timestamp, _)| *timestamp >= cutoff)
                    .copied()
                    .collect()
            }
        }
    }

    pub fn to_points(prices: &[(i64, f64)]) -> Vec<PricePoint> {
        let mut points: Vec<PricePoint> = prices
            .iter()
            .map(|&(timestamp, value)| PricePoint::new(timestamp, value))
            .collect();
        points.sort_by_key(|p| p.timestamp);
        points
    }

    /// 盈亏 = (末价 - 首价) × 持仓数量
    ///
    /// 持仓取调用时的实际余额，等于把当前持仓套用到整个周期。
    /// 盈亏方向只看价格走势，与持仓无关（持仓为 0 时下跌仍记为亏损）。
    /// 空序列时首末价均按 0 处理，结果为 0 且记为盈利。
    pub fn profit_loss(points: &[PricePoint], holding: f64, period: TimePeriod) -> ProfitLoss {
        let first_price = points.first().map(|p| p.value).unwrap_or(0.0);
        let last_price = points.last().map(|p| p.value).unwrap_or(0.0);
        let price_diff = last_price - first_price;
        let amount = price_diff * holding;

        ProfitLoss {
            amount: amount.abs(),
            is_profit: price_diff >= 0.0,
            period_label: period.label().to_string(),
        }
    }

    pub fn build_series(prices: &[(i64, f64)], holding: f64, period: TimePeriod) -> ChartSeries {
        let points = Self::to_points(prices);
        let profit_loss = Self::profit_loss(&points, holding, period);
        ChartSeries { points, profit_loss }
    }

    pub fn portfolio_value(native: &NativeBalance, token: &TokenBalance) -> PortfolioValue {
        PortfolioValue {
            native_value: native.usd_value,
            total_value: native.usd_value + token.usd_value,
            native_balance: native.formatted.clone(),
        }
    }

    /// 价格源不可用时的占位序列
    ///
    /// 价格只取决于点的序号，多次失败得到相同的曲线；
    /// 时间轴按周期的请求天数（1H/6H 也是 1 天）均匀分布到 `now_ms`。
    pub fn placeholder_series(period: TimePeriod, holding: f64, now_ms: i64) -> ChartSeries {
        let span_ms = period.span().num_milliseconds();
        let num_points: i64 = match period {
            TimePeriod::OneHour => 12,
            TimePeriod::SixHours => 36,
            _ => 48,
        };
        let step = span_ms / num_points;

        let mut price = PLACEHOLDER_BASE_PRICE;
        let points: Vec<PricePoint> = (0..num_points)
            .map(|i| {
                let variation = (i as f64 * 0.7).sin() * 25.0 + 2.5;
                price = (price + variation).max(PLACEHOLDER_FLOOR_PRICE);
                PricePoint::new(now_ms - span_ms + step * i, price)
            })
            .collect();

        let profit_loss = Self::profit_loss(&points, holding, period);
        ChartSeries { points, profit_loss }
    }
}
