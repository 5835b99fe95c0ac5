use karte_service::{
    config::{AppConfig, PLACEHOLDER_API_KEY},
    server::{AppState, app},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "karte_service=debug,karte_flow=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    if config.dify_api_key == PLACEHOLDER_API_KEY {
        info!("DIFY_API_KEY not set, proposals run in demo mode");
    }

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(config);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /                 - shop selection");
    info!("  POST /set_shop         - bind shop to session");
    info!("  GET  /input            - treatment input form");
    info!("  POST /generate         - generate and store the message");
    info!("  GET  /result           - composed message");
    info!("  POST /update_shop_url  - switch shop from the result page");
    info!("  GET  /health           - health check");

    axum::serve(listener, app).await?;
    Ok(())
}
