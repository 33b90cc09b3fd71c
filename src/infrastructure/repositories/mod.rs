pub mod instagram_feed_repository;
pub mod linkedin_feed_repository;

pub use instagram_feed_repository::InstagramFeedRepository;
pub use linkedin_feed_repository::LinkedInFeedRepository;
