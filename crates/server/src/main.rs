mod api;
mod router;
mod startup;
mod state;

use tracing::info;

async fn serve(config: &vizlab_core::Config) -> anyhow::Result<()> {
    config.log_summary();

    let state = startup::build_app_state(config)?;
    let app = router::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    vizlab_core::config::load_dotenv();
    let config = vizlab_core::Config::from_env();

    serve(&config).await
}
