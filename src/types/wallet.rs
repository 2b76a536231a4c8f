use serde::{Deserialize, Serialize};

pub const JOINED_DATE_PLACEHOLDER: &str = "Nov 2025";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletInfo {
    pub name: String,
    pub address: String,
    pub joined_date: String,
}

impl WalletInfo {
    pub fn new(name: &str, address: &str, joined: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            joined_date: format!("Joined {}", joined.unwrap_or(JOINED_DATE_PLACEHOLDER)),
        }
    }
}

/// 写入路径的结构化结果，失败时不会被当成成功吞掉
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionResult {
    pub fn ok(hash: String) -> Self {
        Self {
            success: true,
            hash: Some(hash),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            hash: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasEstimate {
    pub gas_units: String,
    pub gas_cost_usd: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransferRequest {
    pub to: String,
    pub amount: String,
}
