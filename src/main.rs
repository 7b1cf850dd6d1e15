use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use legends_api::{app, store::Store};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting api server...");

    dotenvy::dotenv().ok();

    let players_file = std::env::var("PLAYERS_FILE")
        .unwrap_or_else(|_| "data/all_time_players.json".to_string());
    let drafts_file =
        std::env::var("DRAFTS_FILE").unwrap_or_else(|_| "data/draft.json".to_string());

    let store = Store::load(&players_file, &drafts_file)
        .await
        .expect("Failed to load data files");

    tracing::info!("Player data loaded.");

    let host: Ipv4Addr = std::env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string())
        .parse()
        .expect("HOST is not in the correct format");

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT is not the correct format");

    let addr = SocketAddr::from((host, port));

    let app = app(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}
