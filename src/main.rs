use tracing::info;
use xudt_validator::{api::Server, config::Config};

/// The main entry point for the validator service.
///
/// Initializes logging, loads the configuration and serves the JSON-RPC API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load("config/default.toml")?;
    info!("Validator starting with config: {:?}", config);

    let server = Server::new(config)?;
    server.start().await?;

    Ok(())
}
