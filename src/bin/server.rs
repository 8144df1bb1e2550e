//! 威力彩 開獎番号表示サーバー

use anyhow::{Context, Result};
use lottery_scraper::{
    server::build_app, ChromeRenderer, DrawExtractor, LotteryService, ScraperConfig, ServerConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ログ設定
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lottery_scraper=debug,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    let scraper_config = ScraperConfig::from_env().context("Failed to load scraper configuration")?;
    let server_config = ServerConfig::from_env().context("Failed to load server configuration")?;
    tracing::info!(
        "Source: {} (group={}, ball={}, index={})",
        scraper_config.source_url,
        scraper_config.group_selector,
        scraper_config.ball_selector,
        scraper_config.group_index
    );

    let renderer = ChromeRenderer::new(scraper_config.clone());
    let extractor =
        DrawExtractor::new(renderer, &scraper_config).context("Invalid selector configuration")?;
    let app = build_app(LotteryService::new(extractor));

    let addr = server_config.addr();
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
