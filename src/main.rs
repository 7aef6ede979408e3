use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dice_roll::{config::Config, create_app};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dice_roll=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!(
        mode = config.deployment_mode.as_str(),
        "Starting dice-roll on {}:{}",
        config.host,
        config.port
    );

    // Create application
    let app = create_app(config.clone()).await?;

    // Start server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("dice-roll listening at http://{}:{}", config.host, config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
