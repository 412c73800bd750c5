use anyhow::{Context, Result};

use firmdesk_backend::{app, config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings)?;

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        seed_demo_data = settings.seed_demo_data,
        "Starting firmdesk backend"
    );

    // Create application state
    let state = app::AppState::from_settings(settings.clone());

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.server_addr))?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
