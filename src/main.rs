use anyhow::Result;
use ipweather::{AppConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _telemetry = telemetry::init(&config.logging)?;

    tracing::info!("ipweather {} starting", ipweather::VERSION);
    web::run(config).await
}
