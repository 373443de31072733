use std::sync::Arc;

use application::PortfolioApp;
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("portfolio=info,api_server=debug,tower_http=debug")),
        )
        .init();

    info!("🚀 Starting Portfolio content service");

    // Optional first argument: path to a .env file
    let env_path = std::env::args().nth(1);
    let config = Config::from_env(env_path.as_deref()).map_err(|e| anyhow::anyhow!("{}", e))?;
    config.log_config();

    let app = Arc::new(PortfolioApp::new(config.data_dir.clone()));
    api_server::serve(&config, app).await
}
