// TimePeriod, PricePoint, ProfitLoss, ChartSeries
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1H")]
    OneHour,
    #[default]
    #[serde(rename = "6H")]
    SixHours,
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "All")]
    All,
}

impl TimePeriod {
    pub const ALL_PERIODS: [TimePeriod; 6] = [
        TimePeriod::OneHour,
        TimePeriod::SixHours,
        TimePeriod::OneDay,
        TimePeriod::OneWeek,
        TimePeriod::OneMonth,
        TimePeriod::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::OneHour => "1H",
            TimePeriod::SixHours => "6H",
            TimePeriod::OneDay => "1D",
            TimePeriod::OneWeek => "1W",
            TimePeriod::OneMonth => "1M",
            TimePeriod::All => "All",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::OneHour => "Past Hour",
            TimePeriod::SixHours => "Past 6 Hours",
            TimePeriod::OneDay => "Past Day",
            TimePeriod::OneWeek => "Past Week",
            TimePeriod::OneMonth => "Past Month",
            TimePeriod::All => "All Time",
        }
    }

    /// 向价格源请求的固定天数窗口（与具体周期无关，小周期统一取 1 天）
    pub fn lookback_days(&self) -> u32 {
        match self {
            TimePeriod::OneHour | TimePeriod::SixHours | TimePeriod::OneDay => 1,
            TimePeriod::OneWeek => 7,
            TimePeriod::OneMonth => 30,
            TimePeriod::All => 365,
        }
    }

    /// 客户端过滤的截止窗口，`All` 不过滤
    pub fn cutoff(&self) -> Option<Duration> {
        match self {
            TimePeriod::OneHour => Some(Duration::hours(1)),
            TimePeriod::SixHours => Some(Duration::hours(6)),
            TimePeriod::OneDay => Some(Duration::hours(24)),
            TimePeriod::OneWeek => Some(Duration::days(7)),
            TimePeriod::OneMonth => Some(Duration::days(30)),
            TimePeriod::All => None,
        }
    }

    /// 占位数据覆盖的时间跨度，与请求天数一致
    pub fn span(&self) -> Duration {
        Duration::days(self.lookback_days() as i64)
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::ALL_PERIODS
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("未知的时间周期: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 毫秒时间戳
    pub timestamp: i64,
    pub value: f64,
    pub display_date: String,
}

impl PricePoint {
    pub fn new(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value,
            display_date: format_display_date(timestamp),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLoss {
    pub amount: f64,
    pub is_profit: bool,
    pub period_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub points: Vec<PricePoint>,
    pub profit_loss: ProfitLoss,
}

/// 图表横轴显示格式，如 "Nov 5, 03:20 PM"
pub fn format_display_date(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%b %-d, %I:%M %p").to_string())
        .unwrap_or_default()
}
