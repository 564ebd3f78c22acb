//! Gateway binary: load configuration, wire the session validator, serve.

use std::process::exit;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use ai_console::adapters::auth::StaticSessionValidator;
use ai_console::config::AppConfig;
use ai_console::gateway::{app, cors_layer, GatewayState};

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("Invalid configuration: {}", err);
        exit(1);
    }

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let validator = match StaticSessionValidator::from_config(&config.auth) {
        Ok(validator) => Arc::new(validator),
        Err(err) => {
            eprintln!("Invalid auth configuration: {}", err);
            exit(1);
        }
    };

    let state = match GatewayState::new(validator, config.upstream.clone()) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Failed to build HTTP client: {}", err);
            exit(1);
        }
    };

    let mut router = app(state);
    if let Some(cors) = cors_layer(&config.server) {
        router = router.layer(cors);
    }

    let addr = config.server.socket_addr();
    tracing::info!(
        %addr,
        prefix = %config.upstream.path_prefix,
        upstream = %config.upstream.base_url,
        "gateway listening"
    );

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("Failed to bind {}: {}", addr, err);
            exit(1);
        }
    };

    if let Err(err) = axum::serve(listener, router).await {
        tracing::error!("server exited with error: {}", err);
        exit(1);
    }
}
