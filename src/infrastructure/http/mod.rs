pub mod request_id;

pub use request_id::{request_id_middleware, X_REQUEST_ID};

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::controllers::{health, social::SocialFeedController};
use crate::domain::social::SocialFeedService;
use crate::infrastructure::config::Config;

/// Public CORS policy: any origin may read the feeds.
/// Every `OPTIONS` request is answered here with an empty 200.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

const ALLOWED_METHODS: &str = "GET,OPTIONS";
const ALLOWED_HEADERS: &str = "content-type";

/// Build the application router with all routes and layers
pub fn build_router(
    social_service: Arc<SocialFeedService>,
    social_controller: Arc<SocialFeedController>,
) -> Router {
    let social_routes = Router::new()
        .route("/api/social/instagram", get(SocialFeedController::instagram))
        .route("/api/social/linkedin", get(SocialFeedController::linkedin))
        .with_state(social_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(social_service)
        .merge(social_routes)
        .layer(cors_layer())
        // Advertised on every response; preflight values from the CORS layer win
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and serve until a shutdown signal arrives
pub async fn start_http_server(
    config: Arc<Config>,
    social_service: Arc<SocialFeedService>,
    social_controller: Arc<SocialFeedController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(social_service, social_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
