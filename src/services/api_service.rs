use crate::{
    api::{create_router, ApiState},
    config::Config,
    services::DashboardServices,
};
use anyhow::Result;
use tracing::info;

pub struct ApiService {
    config: Config,
    services: DashboardServices,
}

impl ApiService {
    pub fn new(config: Config) -> Result<Self> {
        let services = DashboardServices::from_config(&config)?;
        Ok(Self { config, services })
    }

    pub async fn start(&self) -> Result<()> {
        info!("🚀 启动API服务...");
        info!("👛 钱包: {} ({})", self.config.wallet.name, self.config.wallet.address);

        let api_state = ApiState::new(self.services.clone());

        let app = create_router(api_state);
        let listener = tokio::net::TcpListener::bind(format!("{}:{}", self.config.server.host, self.config.server.port)).await?;

        info!("API Server starting on {}:{}", self.config.server.host, self.config.server.port);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
