use tracing_subscriber::{EnvFilter, fmt};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).init();

    let config = edumanage::config::Config::from_env();
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "edumanage",
        "EduManage starting: RUST_LOG='{}', addr={}, data_dir='{}', persist_session={}",
        rust_log, config.addr(), config.data_dir.display(), config.persist_session
    );

    edumanage::server::run_with_config(config).await
}
