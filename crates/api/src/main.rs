use anyhow::{Context, Result};
use insure_api::{build_app, AppConfig};
use insure_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("insure_api");

    let config = AppConfig::from_env()?;
    let app = build_app(&config)?;

    let bind = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    tracing::info!(
        bind = %bind,
        model = %config.gemini_model,
        "insurance bot listening, webhook at /webhook"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
