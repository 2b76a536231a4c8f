use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_EXPLORER_URL: &str = "https://api.etherscan.io/v2/api";
pub const DEFAULT_PRICE_API_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_TOKEN_CONTRACT: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";
pub const DEFAULT_RPC_URL: &str = "https://rpc.sepolia.org";
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub wallet: WalletConfig,
    pub explorer: ExplorerConfig,
    pub price: PriceConfig,
    pub chain: ChainConfig,
    pub cache: CacheConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalletConfig {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExplorerConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub chain_id: u64,
    pub min_interval_ms: u64,
    pub retry_backoff_ms: u64,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl ExplorerConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceConfig {
    pub api_url: String,
    pub coin_id: String,
    pub fallback_price: f64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub token_contract: String,
    pub token_decimals: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    pub ttl_ms: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenv::dotenv().ok();

        if std::env::var("WALLET_ADDRESS").is_err() {
            Self::print_config_help();
            return Err(anyhow::anyhow!("缺少WALLET_ADDRESS配置"));
        }

        let timeout_secs = env_var_or_default("HTTP_TIMEOUT_SECS", 30)?;

        Ok(Config {
            wallet: WalletConfig {
                name: env_var_or_default("WALLET_NAME", "My Wallet".to_string())?,
                address: required_env_var("WALLET_ADDRESS")?,
                private_key: std::env::var("WALLET_PRIVATE_KEY")
                    .ok()
                    .filter(|k| !k.is_empty()),
            },
            explorer: ExplorerConfig {
                api_url: env_var_or_default("ETHERSCAN_API_URL", DEFAULT_EXPLORER_URL.to_string())?,
                api_key: env_var_or_default("ETHERSCAN_API_KEY", String::new())?,
                chain_id: env_var_or_default("EXPLORER_CHAIN_ID", SEPOLIA_CHAIN_ID)?,
                min_interval_ms: env_var_or_default("EXPLORER_MIN_INTERVAL_MS", 350)?,
                retry_backoff_ms: env_var_or_default("EXPLORER_RETRY_BACKOFF_MS", 1000)?,
                max_retries: env_var_or_default("EXPLORER_MAX_RETRIES", 2)?,
                timeout_secs,
            },
            price: PriceConfig {
                api_url: env_var_or_default("COINGECKO_API_URL", DEFAULT_PRICE_API_URL.to_string())?,
                coin_id: env_var_or_default("PRICE_COIN_ID", "ethereum".to_string())?,
                fallback_price: env_var_or_default("FALLBACK_ETH_PRICE", 3500.0)?,
                timeout_secs,
            },
            chain: ChainConfig {
                rpc_url: env_var_or_default("SEPOLIA_RPC_URL", DEFAULT_RPC_URL.to_string())?,
                token_contract: env_var_or_default(
                    "USDC_CONTRACT_ADDRESS",
                    DEFAULT_TOKEN_CONTRACT.to_string(),
                )?,
                token_decimals: env_var_or_default("TOKEN_DECIMALS", 6)?,
            },
            cache: CacheConfig {
                ttl_ms: env_var_or_default("CACHE_TTL_MS", 60_000)?,
            },
            server: ServerConfig {
                host: env_var_or_default("SERVER_HOST", "0.0.0.0".to_string())?,
                port: env_var_or_default("SERVER_PORT", 3000)?,
            },
        })
    }

    /// 不读取环境变量，直接使用默认值构造配置（测试和嵌入场景使用）
    pub fn for_wallet(address: &str) -> Self {
        Config {
            wallet: WalletConfig {
                name: "My Wallet".to_string(),
                address: address.to_string(),
                private_key: None,
            },
            explorer: ExplorerConfig {
                api_url: DEFAULT_EXPLORER_URL.to_string(),
                api_key: String::new(),
                chain_id: SEPOLIA_CHAIN_ID,
                min_interval_ms: 350,
                retry_backoff_ms: 1000,
                max_retries: 2,
                timeout_secs: 30,
            },
            price: PriceConfig {
                api_url: DEFAULT_PRICE_API_URL.to_string(),
                coin_id: "ethereum".to_string(),
                fallback_price: 3500.0,
                timeout_secs: 30,
            },
            chain: ChainConfig {
                rpc_url: DEFAULT_RPC_URL.to_string(),
                token_contract: DEFAULT_TOKEN_CONTRACT.to_string(),
                token_decimals: 6,
            },
            cache: CacheConfig { ttl_ms: 60_000 },
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
        }
    }

    fn print_config_help() {
        println!("\n🔧 配置指南");
        println!("{}", "=".repeat(50));
        println!("请配置以下环境变量:\n");

        println!("[必需配置]");
        println!("WALLET_ADDRESS=0x...\n");

        println!("[区块浏览器]");
        println!("ETHERSCAN_API_URL={}", DEFAULT_EXPLORER_URL);
        println!("ETHERSCAN_API_KEY=<your key>");
        println!("EXPLORER_CHAIN_ID={}", SEPOLIA_CHAIN_ID);
        println!("EXPLORER_MIN_INTERVAL_MS=350");
        println!("EXPLORER_RETRY_BACKOFF_MS=1000");
        println!("EXPLORER_MAX_RETRIES=2\n");

        println!("[价格与链]");
        println!("COINGECKO_API_URL={}", DEFAULT_PRICE_API_URL);
        println!("PRICE_COIN_ID=ethereum");
        println!("FALLBACK_ETH_PRICE=3500");
        println!("SEPOLIA_RPC_URL={}", DEFAULT_RPC_URL);
        println!("USDC_CONTRACT_ADDRESS={}", DEFAULT_TOKEN_CONTRACT);
        println!("TOKEN_DECIMALS=6");
        println!("WALLET_PRIVATE_KEY=<仅转账需要>\n");

        println!("[可选配置]");
        println!("WALLET_NAME=My Wallet");
        println!("CACHE_TTL_MS=60000");
        println!("HTTP_TIMEOUT_SECS=30");
        println!("SERVER_HOST=0.0.0.0");
        println!("SERVER_PORT=3000\n");

        println!("{}", "=".repeat(50));
    }
}

fn env_var_or_default<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val.parse().map_err(|e| anyhow::anyhow!("配置 {} 解析失败: {}", key, e)),
        Err(_) => Ok(default),
    }
}

fn required_env_var(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("缺少必需配置: {}", key))
}
