use super::price_service::PriceService;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{TransferError, ValidationError};
use crate::types::{GasEstimate, TransactionResult};
use crate::utils::AmountConverter;
use ethers::{
    contract::abigen,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, U256},
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

abigen!(
    Erc20Token,
    r#"[
        function transfer(address to, uint256 amount) external returns (bool)
        function balanceOf(address account) external view returns (uint256)
        function decimals() external view returns (uint8)
    ]"#
);

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// 代币转账（写入路径）
///
/// 提交前依次校验收款地址、金额和余额；成功后使钱包相关缓存失效。
pub struct TransferService {
    cache: Arc<TtlCache>,
    prices: Arc<PriceService>,
    wallet_address: String,
    private_key: Option<String>,
    rpc_url: String,
    chain_id: u64,
    token_contract: String,
    token_decimals: u32,
    fallback_price: f64,
}

impl TransferService {
    pub fn new(config: &Config, cache: Arc<TtlCache>, prices: Arc<PriceService>) -> Self {
        Self {
            cache,
            prices,
            wallet_address: config.wallet.address.clone(),
            private_key: config.wallet.private_key.clone(),
            rpc_url: config.chain.rpc_url.clone(),
            chain_id: config.explorer.chain_id,
            token_contract: config.chain.token_contract.clone(),
            token_decimals: config.chain.token_decimals,
            fallback_price: config.price.fallback_price,
        }
    }

    /// 发送代币，失败以 `{success: false, error}` 返回而不是吞掉
    pub async fn send_token(&self, to: &str, amount: &str) -> TransactionResult {
        match self.try_send_token(to, amount).await {
            Ok(hash) => {
                info!("✅ 转账成功: {} -> {} 数量 {} 交易 {}", self.wallet_address, to, amount, hash);
                self.on_transfer_confirmed(&hash);
                TransactionResult::ok(hash)
            }
            Err(TransferError::Validation(e)) => {
                warn!("转账参数校验失败: {}", e);
                TransactionResult::failed(e.to_string())
            }
            Err(e) => {
                error!("❌ 转账失败: {}", e);
                TransactionResult::failed(e.to_string())
            }
        }
    }

    /// 交易上链后使本钱包的所有缓存条目失效，之后的读取都会回源
    pub fn on_transfer_confirmed(&self, hash: &str) {
        self.cache.invalidate(Some(&self.wallet_address));
        debug!("交易 {} 已确认，钱包 {} 的缓存已失效", hash, self.wallet_address);
    }

    async fn try_send_token(&self, to: &str, amount: &str) -> Result<String, TransferError> {
        let (recipient, raw_amount) = validate_transfer(to, amount, self.token_decimals)?;

        let client = self.signer_client()?;
        let contract = self.token_contract(Arc::clone(&client))?;

        let balance = contract
            .balance_of(client.address())
            .call()
            .await
            .map_err(|e| TransferError::Chain(e.to_string()))?;
        ensure_sufficient_balance(balance, raw_amount)?;

        let call = contract.transfer(recipient, raw_amount);
        let pending = call
            .send()
            .await
            .map_err(|e| TransferError::Chain(e.to_string()))?;
        let receipt = pending
            .await
            .map_err(|e| TransferError::Chain(e.to_string()))?
            .ok_or_else(|| TransferError::Chain("交易已丢弃，未返回回执".to_string()))?;

        Ok(format!("{:?}", receipt.transaction_hash))
    }

    /// 估算转账 Gas 及其美元成本
    pub async fn estimate_gas(&self, to: &str, amount: &str) -> Result<GasEstimate, TransferError> {
        let (recipient, raw_amount) = parse_transfer(to, amount, self.token_decimals)?;

        let client = self.signer_client()?;
        let contract = self.token_contract(Arc::clone(&client))?;

        let gas_units = contract
            .transfer(recipient, raw_amount)
            .estimate_gas()
            .await
            .map_err(|e| TransferError::Chain(e.to_string()))?;
        let gas_price = client
            .get_gas_price()
            .await
            .map_err(|e| TransferError::Chain(e.to_string()))?;

        let cost_eth: f64 = ethers::utils::format_ether(gas_units * gas_price)
            .parse()
            .map_err(|e| TransferError::Chain(format!("Gas 成本解析失败: {}", e)))?;

        let price = match self.prices.spot_price().await {
            Ok(price) => price,
            Err(e) => {
                warn!("获取现价失败，使用兜底价格 {}: {}", self.fallback_price, e);
                self.fallback_price
            }
        };

        Ok(GasEstimate {
            gas_units: gas_units.to_string(),
            gas_cost_usd: cost_eth * price,
        })
    }

    fn signer_client(&self) -> Result<Arc<SignerClient>, TransferError> {
        let private_key = self
            .private_key
            .as_deref()
            .ok_or_else(|| TransferError::NotConfigured("Wallet private key not configured".to_string()))?;

        let wallet = private_key
            .parse::<LocalWallet>()
            .map_err(|e| TransferError::NotConfigured(format!("私钥格式错误: {}", e)))?
            .with_chain_id(self.chain_id);

        let provider = Provider::<Http>::try_from(self.rpc_url.as_str())
            .map_err(|e| TransferError::NotConfigured(format!("RPC 地址错误: {}", e)))?;

        Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
    }

    fn token_contract(&self, client: Arc<SignerClient>) -> Result<Erc20Token<SignerClient>, TransferError> {
        let address: Address = self
            .token_contract
            .parse()
            .map_err(|e| TransferError::NotConfigured(format!("代币合约地址错误: {}", e)))?;
        Ok(Erc20Token::new(address, client))
    }
}

/// 收款地址格式是否合法（用于输入时的实时校验）
pub fn is_valid_address(address: &str) -> bool {
    parse_address(address).is_ok()
}

fn parse_address(address: &str) -> Result<Address, ValidationError> {
    Address::from_str(address.trim()).map_err(|_| ValidationError::InvalidAddress)
}

/// 本地校验收款地址和金额（必须大于 0），不触发任何网络调用
pub fn validate_transfer(to: &str, amount: &str, decimals: u32) -> Result<(Address, U256), ValidationError> {
    let (recipient, raw_amount) = parse_transfer(to, amount, decimals)?;
    if raw_amount.is_zero() {
        return Err(ValidationError::InvalidAmount);
    }
    Ok((recipient, raw_amount))
}

// Gas 估算允许 0 金额
fn parse_transfer(to: &str, amount: &str, decimals: u32) -> Result<(Address, U256), ValidationError> {
    let recipient = parse_address(to)?;
    let amount = Decimal::from_str(amount.trim()).map_err(|_| ValidationError::InvalidAmount)?;
    let raw_amount = AmountConverter::decimal_to_raw(amount, decimals).ok_or(ValidationError::InvalidAmount)?;
    Ok((recipient, raw_amount))
}

pub fn ensure_sufficient_balance(balance: U256, amount: U256) -> Result<(), ValidationError> {
    if balance < amount {
        return Err(ValidationError::InsufficientBalance);
    }
    Ok(())
}
