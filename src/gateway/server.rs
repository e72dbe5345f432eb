use super::handlers::{handle_generate_tweet, handle_health, handle_list_tweets};
use super::{AppState, MAX_BODY_SIZE};

use crate::config::{Config, GatewayConfig};
use crate::generation::{CompletionClient, TweetGenerator};
use crate::store::create_stores;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, StatusCode, header},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

/// Returns true when the bind address is not a loopback address.
fn is_public_bind(host: &str) -> bool {
    !matches!(
        host,
        "127.0.0.1" | "localhost" | "::1" | "[::1]" | "0:0:0:0:0:0:0:1"
    )
}

/// Run the HTTP gateway on `host:port`.
pub async fn run_gateway(host: &str, port: u16, config: Arc<Config>) -> Result<()> {
    if is_public_bind(host) {
        tracing::warn!(host, "gateway is bound to a non-loopback address");
    }

    let listener = bind_listener(host, port).await?;

    run_gateway_with_listener(host, listener, config).await
}

/// Bind `host:port`. Hostnames are resolved and bare IPv6 literals accepted.
async fn bind_listener(host: &str, port: u16) -> Result<tokio::net::TcpListener> {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("bind gateway socket {host}:{port}"))
}

/// Wire stores, provider and generator from config.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let stores = create_stores(config)
        .await
        .context("create stores for gateway")?;
    let completion = CompletionClient::from_config(&config.provider);
    let generator = TweetGenerator::new(
        Arc::clone(&stores.preferences),
        Arc::clone(&stores.history),
        completion,
    )
    .with_store_timeout(Duration::from_secs(config.store.timeout_secs));

    Ok(AppState {
        generator: Arc::new(generator),
        history: stores.history,
        store_backend: stores.backend,
    })
}

/// Run the HTTP gateway from a pre-bound listener.
pub async fn run_gateway_with_listener(
    host: &str,
    listener: tokio::net::TcpListener,
    config: Arc<Config>,
) -> Result<()> {
    let actual_port = listener
        .local_addr()
        .context("get gateway listener local address")?
        .port();
    let display_addr = format!("{host}:{actual_port}");

    let state = build_state(&config).await?;
    print_gateway_banner(&display_addr, &config);

    let app = build_app(state, &config.gateway);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve HTTP gateway")?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn print_gateway_banner(display_addr: &str, config: &Config) {
    println!("Gateway listening on {display_addr}");
    println!("  POST /generate-tweet");
    println!("  GET  /tweets?userId=");
    println!("  GET  /health");
    println!("  model: {}", config.provider.model);
    println!("  store: {}", config.store.backend);
    tracing::info!(
        addr = display_addr,
        model = %config.provider.model,
        store = %config.store.backend,
        "gateway started"
    );
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    if cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Router with all routes and middleware attached.
pub fn build_app(state: AppState, gateway: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/generate-tweet", post(handle_generate_tweet))
        .route("/tweets", get(handle_list_tweets))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(gateway.request_timeout_secs),
        ))
        .layer(cors_layer(&gateway.cors_origins))
}
