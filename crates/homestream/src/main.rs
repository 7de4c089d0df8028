use clap::Parser;
use fileserver::FileServerApi;
use tracing_subscriber::EnvFilter;

mod config;

use config::{Config, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let config = Config::parse();
    init_tracing(config.log_json);

    let root = config.open_root()?;
    tracing::info!(
        "Serving .{} files from {}",
        root.extension(),
        root.path().display()
    );

    FileServerApi::new(root)
        .serve(&config.host, config.port)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
