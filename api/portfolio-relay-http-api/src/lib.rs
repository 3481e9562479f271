use std::sync::Arc;

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use log::info;
use portfolio_relay_app::Application;
use tower_http::cors::{AllowOrigin, CorsLayer};

mod contact;
mod error;
mod health;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// The only origin browsers may call the relay from.
    pub allowed_origin: HeaderValue,
}

#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
}

pub fn router(app: Arc<Application>, config: &HttpConfig) -> Router {
    Router::new()
        .route("/test", get(health::test))
        .route("/send-email", post(contact::send_email))
        .layer(middleware::from_fn(log_request))
        .layer(cors_layer(config.allowed_origin.clone()))
        .with_state(AppState { app })
}

fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn log_request(request: Request, next: Next) -> Response {
    info!("{} {}", request.method(), request.uri());
    next.run(request).await
}

pub async fn serve(
    app: Arc<Application>,
    config: HttpConfig,
    shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;

    info!("Server running on port {}", config.port);
    info!("Server URL: http://{}:{}", config.host, config.port);
    axum::serve(listener, router(app, &config))
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("HTTP API shut down gracefully");
    Ok(())
}
