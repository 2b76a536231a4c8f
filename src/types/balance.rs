// NativeBalance, TokenBalance, PortfolioValue
use serde::{Deserialize, Serialize};

/// 原生币余额，`raw` 为 wei 的十进制字符串
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeBalance {
    pub raw: String,
    pub formatted: String,
    pub usd_value: f64,
}

impl NativeBalance {
    pub fn fallback() -> Self {
        Self {
            raw: "0".to_string(),
            formatted: "0.000000".to_string(),
            usd_value: 0.0,
        }
    }

    /// 持仓数量，用于盈亏计算
    pub fn holding(&self) -> f64 {
        self.formatted.parse().unwrap_or(0.0)
    }
}

/// 代币余额（USDC，6 位精度，1:1 锚定美元）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub raw: String,
    pub formatted: String,
    pub usd_value: f64,
    pub daily_change: f64,
    pub daily_change_percent: f64,
    pub is_profit: bool,
}

impl TokenBalance {
    pub fn fallback() -> Self {
        Self {
            raw: "0".to_string(),
            formatted: "0.00".to_string(),
            usd_value: 0.0,
            daily_change: 0.0,
            daily_change_percent: 0.0,
            is_profit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValue {
    /// 原生币持仓的美元价值（不含代币）
    pub native_value: f64,
    /// 代币 + 原生币
    pub total_value: f64,
    pub native_balance: String,
}

impl PortfolioValue {
    pub fn fallback() -> Self {
        Self {
            native_value: 0.0,
            total_value: 0.0,
            native_balance: "0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreshBalances {
    pub balance: TokenBalance,
    pub portfolio: PortfolioValue,
}

impl FreshBalances {
    pub fn fallback() -> Self {
        Self {
            balance: TokenBalance::fallback(),
            portfolio: PortfolioValue::fallback(),
        }
    }
}
