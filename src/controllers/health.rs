use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::domain::social::{SocialFeedService, SocialFeedServiceApi};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness never fails on missing credentials: an unconfigured provider
/// still serves an empty feed.
pub async fn health_ready(State(service): State<Arc<SocialFeedService>>) -> impl IntoResponse {
    let providers: Map<String, Value> = service
        .provider_status()
        .into_iter()
        .map(|status| {
            (
                status.platform.to_string(),
                serde_json::to_value(status.state).unwrap_or(Value::Null),
            )
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "providers": providers,
        })),
    )
}
