//! Index page loader: fetches page data concurrently and assembles the view-model.

use serde::Serialize;
use std::future::Future;
use std::time::{Duration, Instant};

use crate::domain::page::{PageRequest, PageViewModel};
use crate::domain::team::TEAMS;
use crate::error::{AggregationError, PageError};
use crate::format::{
    format_approx, format_number, APPROX_LABEL, READERS_THRESHOLD, READS_THRESHOLD,
};
use crate::random::RandomSource;
use crate::rankings::extract_leader;
use crate::sources::PageDataSources;
use crate::team::resolve_team;

pub const CACHE_CONTROL: &str = "private, max-age=3600";
pub const VARY: &str = "Cookie";

/// Headers the route attaches to the page response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMeta {
    pub cache_control: &'static str,
    pub vary: &'static str,
    pub server_timing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLoad {
    pub view_model: PageViewModel,
    pub headers: ResponseMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTiming {
    pub name: &'static str,
    pub elapsed: Duration,
}

/// `name;dur=<ms>` entries joined by commas, in fetch order.
pub fn server_timing_header(timings: &[FetchTiming]) -> String {
    timings
        .iter()
        .map(|t| format!("{};dur={:.1}", t.name, t.elapsed.as_secs_f64() * 1000.0))
        .collect::<Vec<_>>()
        .join(",")
}

async fn timed<T>(
    name: &'static str,
    fut: impl Future<Output = anyhow::Result<T>>,
) -> Result<(T, FetchTiming), AggregationError> {
    let start = Instant::now();
    let value = fut.await.map_err(|e| AggregationError::new(name, e))?;
    Ok((
        value,
        FetchTiming {
            name,
            elapsed: start.elapsed(),
        },
    ))
}

/// Loads everything the index page renders.
///
/// All six sources are polled concurrently and joined fail-fast: the first error
/// aborts the load and nothing partial is returned. Sources are never retried here.
pub async fn build_page_view_model<S, R>(
    request: &PageRequest,
    sources: &S,
    random: &R,
) -> Result<PageLoad, PageError>
where
    S: PageDataSources + ?Sized,
    R: RandomSource + ?Sized,
{
    let (
        (user, t_user),
        (posts, t_posts),
        (total_reads, t_reads),
        (rankings, t_rankings),
        (total_readers, t_readers),
        (recommendations, t_recommendations),
    ) = tokio::try_join!(
        timed("user", sources.get_user(request)),
        timed("posts", sources.get_blog_posts(request)),
        timed("reads", sources.get_total_post_reads(request)),
        timed("rankings", sources.get_blog_read_rankings(request)),
        timed("readers", sources.get_reader_count(request)),
        timed("recommendations", sources.get_blog_recommendations(request)),
    )?;

    let server_timing = server_timing_header(&[
        t_user,
        t_posts,
        t_reads,
        t_rankings,
        t_readers,
        t_recommendations,
    ]);
    tracing::debug!(%server_timing, "index page data loaded");

    let explicit_team = user.as_ref().and_then(|u| u.team.known());
    let resolved_team = resolve_team(explicit_team, &TEAMS, &mut || random.next_f64())?;

    let view_model = PageViewModel {
        blog_post_count: format_number(posts.len() as i64),
        total_blog_readers: format_approx(total_readers, READERS_THRESHOLD, APPROX_LABEL),
        total_blog_reads: format_approx(total_reads, READS_THRESHOLD, APPROX_LABEL),
        current_blog_leader_team: extract_leader(&rankings),
        blog_recommendations: recommendations,
        resolved_team,
        random_seed: random.next_f64(),
    };

    Ok(PageLoad {
        view_model,
        headers: ResponseMeta {
            cache_control: CACHE_CONTROL,
            vary: VARY,
            server_timing,
        },
    })
}
