use crate::domain::social::{FeedItem, FeedLimit, Platform, SocialFeedError, SocialFeedRepository};
use crate::infrastructure::config::LinkedInConfig;
use crate::infrastructure::upstream::UpstreamClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const SHARE_CONTENT_KEY: &str = "com.linkedin.ugc.ShareContent";
const FEED_UPDATE_URL: &str = "https://www.linkedin.com/feed/update/";
const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// `GET /v2/ugcPosts?q=authors` response body
#[derive(Debug, Deserialize)]
pub struct UgcPostPage {
    /// `null` and a missing key both mean no posts
    pub elements: Option<Vec<UgcPost>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcPost {
    pub id: Option<String>,
    pub created: Option<AuditStamp>,
    pub specific_content: Option<HashMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
pub struct AuditStamp {
    pub time: Option<serde_json::Number>,
}

impl UgcPost {
    /// The `com.linkedin.ugc.ShareContent` entry, if any
    fn share_content(&self) -> Option<&Value> {
        self.specific_content.as_ref()?.get(SHARE_CONTENT_KEY)
    }

    /// `shareCommentary.text`, read on its own so a malformed `media`
    /// list does not hide the text
    fn commentary(&self) -> Option<String> {
        self.share_content()?
            .pointer("/shareCommentary/text")?
            .as_str()
            .map(str::to_string)
    }

    /// `media[0].media`
    fn first_media(&self) -> Option<String> {
        self.share_content()?
            .pointer("/media/0/media")?
            .as_str()
            .map(str::to_string)
    }

    fn into_feed_item(self, author_urn: &str) -> FeedItem {
        let text = self.commentary().unwrap_or_default();
        let media_url = self.first_media();
        let id = self.id.unwrap_or_default();

        FeedItem {
            permalink: permalink_for(&id),
            id: Some(id).filter(|id| !id.is_empty()),
            platform: Platform::LinkedIn,
            text: Some(text),
            media_url,
            timestamp: self.created.and_then(|c| c.time).map(|t| t.to_string()),
            username: Some(author_urn.to_string()),
        }
    }
}

/// Canonical feed-update link; the UGC API does not return one
pub fn permalink_for(post_id: &str) -> String {
    format!("{}{}", FEED_UPDATE_URL, urlencoding::encode(post_id))
}

/// Decode a `ugcPosts` body into feed items attributed to `author_urn`,
/// keeping upstream order. A missing `elements` array is an empty feed.
pub fn normalize_ugc_page(body: &str, author_urn: &str) -> Result<Vec<FeedItem>, SocialFeedError> {
    let page: UgcPostPage =
        serde_json::from_str(body).map_err(|e| SocialFeedError::MalformedPayload {
            platform: Platform::LinkedIn.to_string(),
            reason: e.to_string(),
        })?;

    Ok(page
        .elements
        .unwrap_or_default()
        .into_iter()
        .map(|post| post.into_feed_item(author_urn))
        .collect())
}

pub struct LinkedInFeedRepository {
    config: LinkedInConfig,
    upstream: UpstreamClient,
}

impl LinkedInFeedRepository {
    pub fn new(config: LinkedInConfig, upstream: UpstreamClient) -> Self {
        Self { config, upstream }
    }

    /// The authors list is a Rest.li expression, so it is encoded by hand
    /// rather than through the query serializer.
    fn posts_url(&self, author_urn: &str, limit: FeedLimit) -> String {
        format!(
            "{}/v2/ugcPosts?q=authors&authors=List({})&sortBy=LAST_MODIFIED&count={}",
            self.config.api_base_url.trim_end_matches('/'),
            urlencoding::encode(author_urn),
            limit
        )
    }
}

#[async_trait]
impl SocialFeedRepository for LinkedInFeedRepository {
    fn platform(&self) -> Platform {
        Platform::LinkedIn
    }

    fn is_configured(&self) -> bool {
        self.config.access_token.is_some() && self.config.author_urn().is_some()
    }

    async fn fetch_items(&self, limit: FeedLimit) -> Result<Vec<FeedItem>, SocialFeedError> {
        let access_token = self.config.access_token.as_deref().ok_or_else(|| {
            SocialFeedError::NotConfigured("LINKEDIN_ACCESS_TOKEN not configured".to_string())
        })?;
        let author_urn = self.config.author_urn().ok_or_else(|| {
            SocialFeedError::NotConfigured(
                "LINKEDIN_ORGANIZATION_ID or LINKEDIN_PERSON_URN not configured".to_string(),
            )
        })?;

        let url = self.posts_url(&author_urn, limit);
        tracing::debug!(author = %author_urn, limit = limit.get(), "Requesting LinkedIn UGC posts");

        let body = self
            .upstream
            .fetch_text(|client| {
                client
                    .get(&url)
                    .bearer_auth(access_token)
                    .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            })
            .await?;

        normalize_ugc_page(&body, &author_urn)
    }
}
