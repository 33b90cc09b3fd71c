pub mod error;
pub mod model;
pub mod service;

pub use error::SocialFeedError;
pub use model::{FeedItem, FeedLimit, FeedResponse, Platform};
pub use service::{SocialFeedService, SocialFeedServiceApi};

use async_trait::async_trait;
use serde::Serialize;

/// Repository for one provider's public post feed.
///
/// Implementations own the whole fetch-and-normalize step for their platform:
/// - checking that the credentials they need are configured
/// - issuing the outbound call
/// - mapping the provider payload into [`FeedItem`]s, preserving upstream order
#[async_trait]
pub trait SocialFeedRepository: Send + Sync {
    fn platform(&self) -> Platform;

    /// Whether the credentials needed for a real fetch are present
    fn is_configured(&self) -> bool;

    async fn fetch_items(&self, limit: FeedLimit) -> Result<Vec<FeedItem>, SocialFeedError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderState {
    Configured,
    NotConfigured,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub platform: Platform,
    pub state: ProviderState,
}
