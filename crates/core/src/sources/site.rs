use anyhow::Result;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::OnceCell;

use crate::domain::page::PageRequest;
use crate::domain::post::{PostSummary, TeamRanking, User};
use crate::sources::content::ContentApiClient;
use crate::sources::PageDataSources;
use crate::storage::stats;

pub const RECOMMENDATION_LIMIT: usize = 3;

/// Production sources: post list from the content service, everything else from Postgres.
///
/// The post list is fetched at most once per instance; call [`SiteDataSources::per_request`]
/// to get a fresh instance for each page load.
#[derive(Debug)]
pub struct SiteDataSources {
    pool: sqlx::PgPool,
    content: ContentApiClient,
    posts: OnceCell<Vec<PostSummary>>,
}

impl SiteDataSources {
    pub fn new(pool: sqlx::PgPool, content: ContentApiClient) -> Self {
        Self {
            pool,
            content,
            posts: OnceCell::new(),
        }
    }

    /// Shares the pool and http client, with an empty post-list cache.
    pub fn per_request(&self) -> Self {
        Self::new(self.pool.clone(), self.content.clone())
    }

    async fn session_user(&self, request: &PageRequest) -> Result<Option<User>> {
        match request.session_id.as_deref() {
            Some(session_id) => stats::user_for_session(&self.pool, session_id).await,
            None => Ok(None),
        }
    }

    async fn posts(&self) -> Result<Vec<PostSummary>> {
        posts_once(&self.posts, || self.content.fetch_posts()).await
    }
}

async fn posts_once<F, Fut>(cell: &OnceCell<Vec<PostSummary>>, fetch: F) -> Result<Vec<PostSummary>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<PostSummary>>>,
{
    cell.get_or_try_init(fetch).await.cloned()
}

#[async_trait::async_trait]
impl PageDataSources for SiteDataSources {
    async fn get_user(&self, request: &PageRequest) -> Result<Option<User>> {
        self.session_user(request).await
    }

    async fn get_blog_posts(&self, _request: &PageRequest) -> Result<Vec<PostSummary>> {
        self.posts().await
    }

    async fn get_total_post_reads(&self, _request: &PageRequest) -> Result<i64> {
        stats::total_post_reads(&self.pool).await
    }

    async fn get_blog_read_rankings(&self, _request: &PageRequest) -> Result<Vec<TeamRanking>> {
        stats::team_rankings(&self.pool).await
    }

    async fn get_reader_count(&self, _request: &PageRequest) -> Result<i64> {
        stats::reader_count(&self.pool).await
    }

    async fn get_blog_recommendations(&self, request: &PageRequest) -> Result<Vec<PostSummary>> {
        let (user, posts) = tokio::try_join!(self.session_user(request), self.posts())?;
        let ranked = stats::top_read_slugs(
            &self.pool,
            user.map(|u| u.id),
            RECOMMENDATION_LIMIT as i64 * 2,
        )
        .await?;
        Ok(pick_recommendations(posts, &ranked, RECOMMENDATION_LIMIT))
    }
}

/// Maps ranked slugs onto known posts. Without any read data, falls back to the newest posts.
pub fn pick_recommendations(
    posts: Vec<PostSummary>,
    ranked_slugs: &[(String, i64)],
    limit: usize,
) -> Vec<PostSummary> {
    if ranked_slugs.is_empty() {
        let mut recent = posts;
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        return recent;
    }

    let mut by_slug: HashMap<String, PostSummary> =
        posts.into_iter().map(|p| (p.slug.clone(), p)).collect();

    ranked_slugs
        .iter()
        .filter_map(|(slug, reads)| {
            let mut post = by_slug.remove(slug)?;
            post.reads = Some(*reads);
            Some(post)
        })
        .take(limit)
        .collect()
}
