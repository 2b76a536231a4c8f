use crate::cache::TtlCache;
use crate::error::FetchError;
use crate::explorer::{ExplorerClient, TokenTransferRecord, TransactionRecord};
use crate::types::DepositTransaction;
use crate::utils::AmountConverter;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

pub const MAX_RECENT_DEPOSITS: usize = 5;
const TRANSFER_PAGE_SIZE: &str = "10";

pub struct HistoryService {
    explorer: Arc<ExplorerClient>,
    cache: Arc<TtlCache>,
    token_contract: String,
    token_decimals: u32,
}

impl HistoryService {
    pub fn new(
        explorer: Arc<ExplorerClient>,
        cache: Arc<TtlCache>,
        token_contract: String,
        token_decimals: u32,
    ) -> Self {
        Self {
            explorer,
            cache,
            token_contract,
            token_decimals,
        }
    }

    /// 地址第一笔交易的月份，如 "Nov 2025"；没有任何交易时返回 `None`
    pub async fn first_transaction_date(&self, address: &str) -> Result<Option<String>, FetchError> {
        let cache_key = TtlCache::key(&["first-tx", address]);
        if let Some(cached) = self.cache.get::<String>(&cache_key) {
            return Ok(Some(cached));
        }

        let result = self
            .explorer
            .call(&[
                ("module", "account"),
                ("action", "txlist"),
                ("address", address),
                ("startblock", "0"),
                ("endblock", "99999999"),
                ("page", "1"),
                ("offset", "1"),
                ("sort", "asc"),
            ])
            .await?;

        let transactions: Vec<TransactionRecord> = serde_json::from_value(result)?;
        let Some(first) = transactions.first() else {
            debug!("地址 {} 没有交易记录", address);
            return Ok(None);
        };

        let seconds = parse_decimal_u64(&first.time_stamp)?;
        let formatted = DateTime::<Utc>::from_timestamp(seconds as i64, 0)
            .map(|dt| dt.format("%b %Y").to_string())
            .ok_or_else(|| FetchError::decode(format!("无效的时间戳: {}", first.time_stamp)))?;

        self.cache.set(cache_key, formatted.clone());
        Ok(Some(formatted))
    }

    pub async fn block_height(&self) -> Result<u64, FetchError> {
        let result = self
            .explorer
            .call(&[("module", "proxy"), ("action", "eth_blockNumber")])
            .await?;

        match result {
            Value::String(hex) => parse_hex_u64(&hex),
            other => Err(FetchError::decode(format!("区块高度格式错误: {}", other))),
        }
    }

    /// 最近的入账代币转账（最多 5 条）
    pub async fn recent_deposits(&self, address: &str) -> Result<Vec<DepositTransaction>, FetchError> {
        let cache_key = TtlCache::key(&["recent-deposits", address]);
        if let Some(cached) = self.cache.get::<Vec<DepositTransaction>>(&cache_key) {
            return Ok(cached);
        }

        let current_block = self.block_height().await?;

        let result = self
            .explorer
            .call(&[
                ("module", "account"),
                ("action", "tokentx"),
                ("contractaddress", self.token_contract.as_str()),
                ("address", address),
                ("page", "1"),
                ("offset", TRANSFER_PAGE_SIZE),
                ("sort", "desc"),
            ])
            .await?;

        let records: Vec<TokenTransferRecord> = serde_json::from_value(result)?;
        let deposits = normalize_deposits(&records, address, current_block, self.token_decimals)?;

        info!("📥 地址 {} 最近入账 {} 笔 (区块 {})", address, deposits.len(), current_block);
        self.cache.set(cache_key, deposits.clone());
        Ok(deposits)
    }
}

/// 只保留转入本地址的记录（地址比较忽略大小写），按原顺序取前 5 条，
/// 确认数 = 当前区块 - 交易区块（浏览器区块落后时记为 0）
pub fn normalize_deposits(
    records: &[TokenTransferRecord],
    address: &str,
    current_block: u64,
    decimals: u32,
) -> Result<Vec<DepositTransaction>, FetchError> {
    records
        .iter()
        .filter(|tx| tx.to.eq_ignore_ascii_case(address))
        .take(MAX_RECENT_DEPOSITS)
        .map(|tx| {
            let tx_block = parse_decimal_u64(&tx.block_number)?;
            let amount = AmountConverter::raw_to_decimal(&tx.value, decimals)?;
            let seconds = parse_decimal_u64(&tx.time_stamp)?;

            Ok(DepositTransaction::new(
                tx.hash.clone(),
                tx.from.clone(),
                AmountConverter::format_fixed(amount, 2),
                seconds as i64 * 1000,
                current_block.saturating_sub(tx_block),
            ))
        })
        .collect()
}

fn parse_decimal_u64(value: &str) -> Result<u64, FetchError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| FetchError::decode(format!("无效的数字 '{}': {}", value, e)))
}

fn parse_hex_u64(value: &str) -> Result<u64, FetchError> {
    let digits = value.trim().trim_start_matches("0x").trim_start_matches("0X");
    u64::from_str_radix(digits, 16).map_err(|e| FetchError::decode(format!("无效的十六进制 '{}': {}", value, e)))
}
