use anyhow::Result;
use pdftoolbox_api::{router, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pdftoolbox_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    let config = ApiConfig::from_env();
    let app = router(&config);

    let addr = config.socket_addr();
    info!(
        max_upload_bytes = config.max_upload_bytes,
        "Starting PDF toolbox API on http://{}", addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
