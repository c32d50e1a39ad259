use anyhow::{Context, Result};
use card_renderer::card::assets::AssetCache;
use card_renderer::card::renderer::RenderingEngine;
use card_renderer::card::template::CardTemplate;
use card_renderer::settings::get_config;
use card_renderer::{AppState, init_openapi_route};
use poem::listener::TcpListener;
use tracing::Level;

use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = Level::DEBUG;
    // Logging to File
    let file_appender = tracing_appender::rolling::daily("./logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(log_level)
        .init();

    tracing::info!("Initializing Card Renderer...");

    let config = get_config()?;
    tracing::info!("run with config: {:?}", config);

    let assets = Arc::new(AssetCache::load(&config.asset_dir)?);
    let template = CardTemplate::new(assets, config.emoji_base_url.clone());

    let engine = Arc::new(RenderingEngine::new(config.viewport())?);
    if !config.html_debug {
        engine.warm_up().context("Failed to initialize rendering engine")?;
    }

    let app_state = Arc::new(AppState {
        template,
        engine,
        html_debug: config.html_debug,
    });

    tracing::info!("Card renderer initialized successfully");

    let app = init_openapi_route(app_state, &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await
    .context("server stopped with an error")
}
