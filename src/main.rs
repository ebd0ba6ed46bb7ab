use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use axum::Router;

use reddevils_api::build_router;
use reddevils_api::config::AppConfig;
use reddevils_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    if !config.has_api_key() {
        tracing::warn!("⚠️ FOOTBALL_API_KEY is not set, upstream requests will be rejected");
    }

    create_cache_dir(&config).await;

    let addr = SocketAddr::new(parse_host(&config.host), config.port);
    let app = build_router(AppState::new(config));

    start_server(app, addr).await;
}

async fn create_cache_dir(config: &AppConfig) {
    if let Err(e) = tokio::fs::create_dir_all(&config.cache_dir).await {
        tracing::warn!("Failed to create {}: {}", config.cache_dir.display(), e);
    }
}

fn parse_host(host: &str) -> IpAddr {
    host.parse()
        .unwrap_or_else(|_| IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

async fn start_server(app: Router, addr: SocketAddr) {
    tracing::info!("🚀 Server starting on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}
