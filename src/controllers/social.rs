use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    domain::social::{
        FeedLimit, FeedResponse, Platform, SocialFeedError, SocialFeedService,
        SocialFeedServiceApi,
    },
    error::{AppError, AppResult},
};

/// Five minute shared cache, refreshed in the background
pub const FEED_CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=300";

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    /// Kept as text so a bad value falls back to the default instead of a 400
    #[serde(default)]
    pub limit: Option<String>,
}

pub struct SocialFeedController {
    social_service: Arc<SocialFeedService>,
}

impl SocialFeedController {
    pub fn new(social_service: Arc<SocialFeedService>) -> Self {
        Self { social_service }
    }

    /// GET /api/social/instagram - Latest Instagram posts
    pub async fn instagram(
        State(controller): State<Arc<SocialFeedController>>,
        query: Option<Query<FeedQuery>>,
    ) -> AppResult<Response> {
        controller.serve(Platform::Instagram, query).await
    }

    /// GET /api/social/linkedin - Latest LinkedIn UGC posts
    pub async fn linkedin(
        State(controller): State<Arc<SocialFeedController>>,
        query: Option<Query<FeedQuery>>,
    ) -> AppResult<Response> {
        controller.serve(Platform::LinkedIn, query).await
    }

    /// An unparsable query string is treated like an empty one
    async fn serve(
        &self,
        platform: Platform,
        query: Option<Query<FeedQuery>>,
    ) -> AppResult<Response> {
        let query = query.map(|Query(q)| q).unwrap_or_default();
        let limit = FeedLimit::from_query(query.limit.as_deref());

        match self.social_service.fetch_feed(platform, limit).await {
            Ok(items) => Ok((
                StatusCode::OK,
                [(header::CACHE_CONTROL, FEED_CACHE_CONTROL)],
                Json(FeedResponse::with_items(items)),
            )
                .into_response()),
            Err(SocialFeedError::NotConfigured(message)) => {
                Ok((StatusCode::OK, Json(FeedResponse::not_configured(message))).into_response())
            }
            Err(e) => Err(AppError::from(e)),
        }
    }
}
