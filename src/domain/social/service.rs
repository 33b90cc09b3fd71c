use super::error::SocialFeedError;
use super::{FeedItem, FeedLimit, Platform, ProviderState, ProviderStatus, SocialFeedRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

pub struct SocialFeedService {
    repositories: HashMap<Platform, Arc<dyn SocialFeedRepository>>,
}

impl SocialFeedService {
    pub fn new(repositories: Vec<Arc<dyn SocialFeedRepository>>) -> Self {
        Self {
            repositories: repositories
                .into_iter()
                .map(|repo| (repo.platform(), repo))
                .collect(),
        }
    }
}

#[async_trait]
pub trait SocialFeedServiceApi: Send + Sync {
    async fn fetch_feed(
        &self,
        platform: Platform,
        limit: FeedLimit,
    ) -> Result<Vec<FeedItem>, SocialFeedError>;

    fn provider_status(&self) -> Vec<ProviderStatus>;
}

#[async_trait]
impl SocialFeedServiceApi for SocialFeedService {
    async fn fetch_feed(
        &self,
        platform: Platform,
        limit: FeedLimit,
    ) -> Result<Vec<FeedItem>, SocialFeedError> {
        let repo = self.repositories.get(&platform).ok_or_else(|| {
            SocialFeedError::NotConfigured(format!("{} feed not configured", platform))
        })?;

        let start_time = std::time::Instant::now();
        let result = repo.fetch_items(limit).await;
        let latency_ms = start_time.elapsed().as_millis();

        match &result {
            Ok(items) => tracing::info!(
                platform = %platform,
                limit = limit.get(),
                item_count = items.len(),
                latency_ms = latency_ms,
                "Social feed fetched"
            ),
            Err(SocialFeedError::NotConfigured(message)) => tracing::info!(
                platform = %platform,
                message = %message,
                "Social feed skipped"
            ),
            Err(e) => tracing::warn!(
                platform = %platform,
                error = %e,
                latency_ms = latency_ms,
                "Social feed fetch failed"
            ),
        }

        result
    }

    fn provider_status(&self) -> Vec<ProviderStatus> {
        let mut statuses: Vec<ProviderStatus> = self
            .repositories
            .values()
            .map(|repo| ProviderStatus {
                platform: repo.platform(),
                state: if repo.is_configured() {
                    ProviderState::Configured
                } else {
                    ProviderState::NotConfigured
                },
            })
            .collect();
        statuses.sort_by_key(|s| s.platform.as_str());
        statuses
    }
}
