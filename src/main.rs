use book_catalog::config::{self, LogFormat};
use book_catalog::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;

    let subscriber = tracing_subscriber::fmt().with_env_filter(EnvFilter::try_new(&config.log_level)?);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }

    config.print_summary();

    server::run(config).await
}
