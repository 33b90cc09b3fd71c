pub mod retry;

pub use retry::RetryPolicy;

use crate::domain::social::SocialFeedError;
use crate::infrastructure::config::UpstreamConfig;

const USER_AGENT: &str = "Vihaya-Social-Feed";

/// Shared HTTP client for provider APIs.
/// Performs one GET per attempt and classifies the outcome into feed errors.
#[derive(Clone)]
pub struct UpstreamClient {
    http_client: reqwest::Client,
    retry: RetryPolicy,
}

impl UpstreamClient {
    pub fn new(http_client: reqwest::Client, retry: RetryPolicy) -> Self {
        Self { http_client, retry }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self::new(
            builder.build()?,
            RetryPolicy::new(config.max_retries, config.retry_base_delay()),
        ))
    }

    /// Send the request produced by `build` and return the response body on 2xx.
    ///
    /// Non-2xx answers become [`SocialFeedError::Upstream`] carrying the raw body
    /// text; connection and read failures become [`SocialFeedError::Transport`].
    pub async fn fetch_text<F>(&self, build: F) -> Result<String, SocialFeedError>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder + Sync,
    {
        let build = &build;
        let http_client = &self.http_client;

        self.retry
            .run(move || async move {
                let response = build(http_client)
                    .send()
                    .await
                    .map_err(|e| SocialFeedError::Transport(e.to_string()))?;

                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| SocialFeedError::Transport(e.to_string()))?;

                if !status.is_success() {
                    tracing::debug!(status = status.as_u16(), "Upstream rejected request");
                    return Err(SocialFeedError::Upstream {
                        status: status.as_u16(),
                        body,
                    });
                }

                Ok(body)
            })
            .await
    }
}
