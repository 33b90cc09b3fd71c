use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_INSTAGRAM_API_BASE_URL: &str = "https://graph.instagram.com";
pub const DEFAULT_LINKEDIN_API_BASE_URL: &str = "https://api.linkedin.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub instagram: InstagramConfig,
    pub linkedin: LinkedInConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Used when `LOG_FORMAT` is unset: JSON lines in production
    pub fn default_for(environment: &Environment) -> Self {
        match environment {
            Environment::Production => LogFormat::Json,
            Environment::Development => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstagramConfig {
    pub access_token: Option<String>,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkedInConfig {
    pub access_token: Option<String>,
    pub organization_id: Option<String>,
    pub person_urn: Option<String>,
    pub api_base_url: String,
}

impl LinkedInConfig {
    /// Author URN whose posts are listed. The organization wins when both are set.
    pub fn author_urn(&self) -> Option<String> {
        self.organization_id
            .as_ref()
            .map(|id| format!("urn:li:organization:{}", id))
            .or_else(|| self.person_urn.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    pub timeout_secs: Option<u64>,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match var("ENVIRONMENT").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        let config = Config {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT").unwrap_or_else(|| "8080".to_string()).parse()?,
            log_format: match var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                Some(_) => LogFormat::Pretty,
                None => LogFormat::default_for(&environment),
            },
            environment,
            instagram: InstagramConfig {
                access_token: var("INSTAGRAM_ACCESS_TOKEN"),
                api_base_url: var("INSTAGRAM_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_INSTAGRAM_API_BASE_URL.to_string()),
            },
            linkedin: LinkedInConfig {
                access_token: var("LINKEDIN_ACCESS_TOKEN"),
                organization_id: var("LINKEDIN_ORGANIZATION_ID"),
                person_urn: var("LINKEDIN_PERSON_URN"),
                api_base_url: var("LINKEDIN_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LINKEDIN_API_BASE_URL.to_string()),
            },
            upstream: UpstreamConfig {
                timeout_secs: var("UPSTREAM_TIMEOUT_SECS").map(|v| v.parse()).transpose()?,
                max_retries: var("UPSTREAM_MAX_RETRIES")
                    .unwrap_or_else(|| "0".to_string())
                    .parse()?,
                retry_base_delay_ms: var("UPSTREAM_RETRY_BASE_DELAY_MS")
                    .unwrap_or_else(|| "200".to_string())
                    .parse()?,
            },
        };

        Ok(config)
    }

}
