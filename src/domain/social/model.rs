use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of posts requested when the caller does not ask for a valid amount
pub const DEFAULT_FEED_LIMIT: u32 = 9;
/// Upper bound forwarded to providers
pub const MAX_FEED_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    LinkedIn,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform-agnostic representation of one social media post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Resolved `limit` query parameter.
///
/// Missing, non-numeric and zero values fall back to [`DEFAULT_FEED_LIMIT`];
/// anything above [`MAX_FEED_LIMIT`] is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedLimit(u32);

impl FeedLimit {
    pub fn new(value: u32) -> Self {
        match value {
            0 => Self::default(),
            v => Self(v.min(MAX_FEED_LIMIT)),
        }
    }

    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.trim().parse::<u32>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for FeedLimit {
    fn default() -> Self {
        Self(DEFAULT_FEED_LIMIT)
    }
}

impl fmt::Display for FeedLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// JSON body returned by the social feed endpoints.
/// `items` is always present so the page can render whatever happened upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FeedResponse {
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn not_configured(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}
