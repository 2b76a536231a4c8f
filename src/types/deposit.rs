use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositStatus {
    Pending,
    Confirmed,
}

impl DepositStatus {
    /// 已打包进区块（1 个确认）即视为确认
    pub fn from_confirmations(confirmations: u64) -> Self {
        if confirmations >= 1 {
            DepositStatus::Confirmed
        } else {
            DepositStatus::Pending
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositTransaction {
    pub hash: String,
    pub from: String,
    pub amount: String,
    /// 毫秒时间戳
    pub timestamp: i64,
    pub confirmations: u64,
    pub status: DepositStatus,
}

impl DepositTransaction {
    pub fn new(hash: String, from: String, amount: String, timestamp: i64, confirmations: u64) -> Self {
        Self {
            hash,
            from,
            amount,
            timestamp,
            confirmations,
            status: DepositStatus::from_confirmations(confirmations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_confirmations() {
        assert_eq!(DepositStatus::from_confirmations(0), DepositStatus::Pending);
        assert_eq!(DepositStatus::from_confirmations(1), DepositStatus::Confirmed);
        assert_eq!(DepositStatus::from_confirmations(12), DepositStatus::Confirmed);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&DepositStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
