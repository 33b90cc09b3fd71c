use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vihaya_social::controllers::social::SocialFeedController;
use vihaya_social::domain::social::{SocialFeedRepository, SocialFeedService};
use vihaya_social::infrastructure::config::{Config, LogFormat};
use vihaya_social::infrastructure::http::start_http_server;
use vihaya_social::infrastructure::repositories::{InstagramFeedRepository, LinkedInFeedRepository};
use vihaya_social::infrastructure::upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Vihaya social feed service on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        instagram_token = config.instagram.access_token.is_some(),
        linkedin_token = config.linkedin.access_token.is_some(),
        linkedin_author = config.linkedin.author_urn().is_some(),
        max_retries = config.upstream.max_retries,
        "Provider credentials check"
    );

    if config.instagram.access_token.is_none() || config.linkedin.access_token.is_none() {
        tracing::warn!("Some social providers are not configured; their feeds will be empty");
    }

    let upstream = UpstreamClient::from_config(&config.upstream)?;
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject provider config and upstream client)
    tracing::info!("Instantiating repositories...");
    let instagram_repo: Arc<dyn SocialFeedRepository> = Arc::new(InstagramFeedRepository::new(
        config.instagram.clone(),
        upstream.clone(),
    ));
    let linkedin_repo: Arc<dyn SocialFeedRepository> = Arc::new(LinkedInFeedRepository::new(
        config.linkedin.clone(),
        upstream,
    ));

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let social_service = Arc::new(SocialFeedService::new(vec![instagram_repo, linkedin_repo]));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let social_controller = Arc::new(SocialFeedController::new(social_service.clone()));

    start_http_server(config, social_service, social_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vihaya_social=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
