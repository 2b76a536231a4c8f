// 区块浏览器原始响应结构
use serde::Deserialize;
use serde_json::Value;

pub const NO_TRANSACTIONS_FOUND: &str = "No transactions found";
pub const RATE_LIMIT_MARKER: &str = "rate limit";

/// `module`/`action` 接口的统一外层结构。
/// proxy 模块走 JSON-RPC 格式，没有 `status` 字段，错误放在 `error` 中。
#[derive(Debug, Deserialize)]
pub struct ExplorerResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ExplorerResponse {
    pub fn is_error_status(&self) -> bool {
        self.status.as_deref() == Some("0")
    }

    pub fn result_text(&self) -> Option<&str> {
        self.result.as_str()
    }

    pub fn is_rate_limited(&self) -> bool {
        self.is_error_status()
            && self
                .result_text()
                .map(|r| r.contains(RATE_LIMIT_MARKER))
                .unwrap_or(false)
    }

    pub fn is_empty_result(&self) -> bool {
        self.is_error_status() && self.message.as_deref() == Some(NO_TRANSACTIONS_FOUND)
    }
}

/// `tokentx` 列表中的单条转账记录，数字字段均为十进制字符串
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransferRecord {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub block_number: String,
    pub time_stamp: String,
}

/// `txlist` 列表中的单条交易记录（只取用到的字段）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub hash: String,
    pub block_number: String,
    pub time_stamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_rate_limited() {
        let resp: ExplorerResponse = serde_json::from_value(json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Max calls per sec rate limit reached (3/sec)"
        }))
        .unwrap();
        assert!(resp.is_rate_limited());
        assert!(!resp.is_empty_result());
    }

    #[test]
    fn test_classify_no_transactions() {
        let resp: ExplorerResponse = serde_json::from_value(json!({
            "status": "0",
            "message": "No transactions found",
            "result": []
        }))
        .unwrap();
        assert!(resp.is_empty_result());
        assert!(!resp.is_rate_limited());
    }

    #[test]
    fn test_proxy_response_has_no_status() {
        let resp: ExplorerResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 83,
            "result": "0x6e2b3a"
        }))
        .unwrap();
        assert!(!resp.is_error_status());
        assert_eq!(resp.result_text(), Some("0x6e2b3a"));
    }

    #[test]
    fn test_transfer_record_field_names() {
        let record: TokenTransferRecord = serde_json::from_value(json!({
            "hash": "0xh",
            "from": "0xf",
            "to": "0xt",
            "value": "1500000",
            "blockNumber": "100",
            "timeStamp": "1700000000",
            "tokenDecimal": "6"
        }))
        .unwrap();
        assert_eq!(record.block_number, "100");
        assert_eq!(record.time_stamp, "1700000000");
    }
}
