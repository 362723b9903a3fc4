use anyhow::Result;

use crate::domain::page::PageRequest;
use crate::domain::post::{PostSummary, TeamRanking, User};

pub mod content;
pub mod site;

/// Everything the index page loader reads. Implementations own their retry policy.
#[async_trait::async_trait]
pub trait PageDataSources: Send + Sync {
    async fn get_user(&self, request: &PageRequest) -> Result<Option<User>>;

    async fn get_blog_posts(&self, request: &PageRequest) -> Result<Vec<PostSummary>>;

    async fn get_total_post_reads(&self, request: &PageRequest) -> Result<i64>;

    /// Sorted by reads, descending.
    async fn get_blog_read_rankings(&self, request: &PageRequest) -> Result<Vec<TeamRanking>>;

    async fn get_reader_count(&self, request: &PageRequest) -> Result<i64>;

    async fn get_blog_recommendations(&self, request: &PageRequest) -> Result<Vec<PostSummary>>;
}
