pub mod domain;
pub mod error;
pub mod format;
pub mod loader;
pub mod random;
pub mod rankings;
pub mod sections;
pub mod seo;
pub mod sources;
pub mod storage;
pub mod team;

pub mod config {
    use anyhow::Context;

    const DEFAULT_SITE_URL: &str = "https://kos.dev";
    const DEFAULT_SOCIAL_IMAGE_BASE_URL: &str = "https://res.cloudinary.com/kos-dev/image/upload";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub database_url: Option<String>,
        pub content_api_base_url: Option<String>,
        pub content_api_key: Option<String>,
        pub site_url: String,
        pub social_image_base_url: String,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                database_url: std::env::var("DATABASE_URL").ok(),
                content_api_base_url: std::env::var("CONTENT_API_BASE_URL").ok(),
                content_api_key: std::env::var("CONTENT_API_KEY").ok(),
                site_url: std::env::var("SITE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
                social_image_base_url: std::env::var("SOCIAL_IMAGE_BASE_URL")
                    .ok()
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SOCIAL_IMAGE_BASE_URL.to_string()),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn require_database_url(&self) -> anyhow::Result<&str> {
            self.database_url
                .as_deref()
                .context("DATABASE_URL is required")
        }

        pub fn require_content_api_base_url(&self) -> anyhow::Result<&str> {
            self.content_api_base_url
                .as_deref()
                .context("CONTENT_API_BASE_URL is required")
        }
    }
}
