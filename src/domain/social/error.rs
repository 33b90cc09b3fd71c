use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SocialFeedError {
    /// A required credential is absent. Rendered as a 200 with an explanatory message.
    #[error("{0}")]
    NotConfigured(String),
    /// The provider answered with a non-2xx status; `body` is its raw response text.
    #[error("upstream responded with {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("{0}")]
    Transport(String),
    #[error("malformed {platform} payload: {reason}")]
    MalformedPayload { platform: String, reason: String },
}

impl SocialFeedError {
    /// Whether another attempt against the provider could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<SocialFeedError> for AppError {
    fn from(err: SocialFeedError) -> Self {
        match err {
            SocialFeedError::NotConfigured(msg) => AppError::NotConfigured(msg),
            SocialFeedError::Upstream { status, body } => AppError::Upstream { status, body },
            SocialFeedError::Transport(msg) => AppError::ExternalService(msg),
            err @ SocialFeedError::MalformedPayload { .. } => AppError::Internal(err.to_string()),
        }
    }
}
