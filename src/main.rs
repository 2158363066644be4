use anyhow::Context;
use auth_frontend_rs::{server::start_server, FrontendConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_frontend_rs=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = envy::prefixed("FRONTEND_")
        .from_env::<FrontendConfig>()
        .context("failed reading FRONTEND_ settings from the environment")?;

    start_server(config).await?;

    Ok(())
}
