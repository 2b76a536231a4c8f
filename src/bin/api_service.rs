use anyhow::Result;
use tracing::{info, Level};
use wallet_dashboard::config::Config;
use wallet_dashboard::services::ApiService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🔧 启动钱包数据服务...");

    let config = Config::from_env()?;
    info!(
        "配置加载完成: chain_id={} 缓存TTL={:?} 请求间隔={:?}",
        config.explorer.chain_id,
        config.cache.ttl(),
        config.explorer.min_interval()
    );
    if config.wallet.private_key.is_none() {
        info!("未配置 WALLET_PRIVATE_KEY，转账接口将返回错误");
    }

    let api_service = ApiService::new(config)?;
    api_service.start().await?;

    Ok(())
}
