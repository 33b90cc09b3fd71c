use crate::domain::social::{FeedItem, FeedLimit, Platform, SocialFeedError, SocialFeedRepository};
use crate::infrastructure::config::InstagramConfig;
use crate::infrastructure::upstream::UpstreamClient;
use async_trait::async_trait;
use serde::Deserialize;

const MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,permalink,thumbnail_url,timestamp,username";

/// `GET /me/media` response body
#[derive(Debug, Deserialize)]
pub struct InstagramMediaPage {
    /// `null` and a missing key both mean no posts
    pub data: Option<Vec<InstagramMedia>>,
}

#[derive(Debug, Deserialize)]
pub struct InstagramMedia {
    pub id: Option<String>,
    pub caption: Option<String>,
    pub media_type: Option<String>,
    pub media_url: Option<String>,
    pub permalink: Option<String>,
    pub thumbnail_url: Option<String>,
    pub timestamp: Option<String>,
    pub username: Option<String>,
}

impl From<InstagramMedia> for FeedItem {
    fn from(media: InstagramMedia) -> Self {
        Self {
            id: media.id,
            platform: Platform::Instagram,
            text: media.caption,
            // Videos may only expose a thumbnail until processing finishes
            media_url: media.media_url.or(media.thumbnail_url),
            permalink: media.permalink.unwrap_or_default(),
            timestamp: media.timestamp,
            username: media.username,
        }
    }
}

/// Decode a `/me/media` body into feed items, keeping upstream order.
/// A missing `data` array is an empty feed.
pub fn normalize_media_page(body: &str) -> Result<Vec<FeedItem>, SocialFeedError> {
    let page: InstagramMediaPage =
        serde_json::from_str(body).map_err(|e| SocialFeedError::MalformedPayload {
            platform: Platform::Instagram.to_string(),
            reason: e.to_string(),
        })?;

    Ok(page
        .data
        .unwrap_or_default()
        .into_iter()
        .map(FeedItem::from)
        .collect())
}

pub struct InstagramFeedRepository {
    config: InstagramConfig,
    upstream: UpstreamClient,
}

impl InstagramFeedRepository {
    pub fn new(config: InstagramConfig, upstream: UpstreamClient) -> Self {
        Self { config, upstream }
    }

    fn media_url(&self) -> String {
        format!("{}/me/media", self.config.api_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SocialFeedRepository for InstagramFeedRepository {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn is_configured(&self) -> bool {
        self.config.access_token.is_some()
    }

    async fn fetch_items(&self, limit: FeedLimit) -> Result<Vec<FeedItem>, SocialFeedError> {
        let access_token = self.config.access_token.as_deref().ok_or_else(|| {
            SocialFeedError::NotConfigured("INSTAGRAM_ACCESS_TOKEN not configured".to_string())
        })?;

        let url = self.media_url();
        let limit = limit.to_string();
        tracing::debug!(url = %url, limit = %limit, "Requesting Instagram media");

        let body = self
            .upstream
            .fetch_text(|client| {
                client.get(&url).query(&[
                    ("fields", MEDIA_FIELDS),
                    ("access_token", access_token),
                    ("limit", limit.as_str()),
                ])
            })
            .await?;

        normalize_media_page(&body)
    }
}
