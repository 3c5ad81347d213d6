use bidquiz::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), BidquizError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(bind = %config.bind_addr, "starting bidquiz");

    let server = BidquizServerBuilder::from_config(config).build().await?;
    server.run().await
}
