use serde::Serialize;

use crate::domain::post::PostSummary;
use crate::domain::team::Team;

/// Request-scoped data for the index page. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageViewModel {
    pub blog_post_count: String,
    pub total_blog_readers: String,
    pub total_blog_reads: String,
    pub current_blog_leader_team: Option<Team>,
    pub blog_recommendations: Vec<PostSummary>,
    pub resolved_team: Team,
    /// In `[0, 1)`; selects the decorative image variant.
    pub random_seed: f64,
}

/// Inbound page request, reduced to what the loader and sections read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub session_id: Option<String>,
    pub autoplay: bool,
    /// Raw `?tab=N` value; validated by the section that owns the tabs.
    pub tab: Option<usize>,
}

impl PageRequest {
    pub const SESSION_COOKIE: &'static str = "kos_session";

    /// Builds a request from the raw URL and `Cookie` header value.
    pub fn new(url: impl Into<String>, query: Option<&str>, cookie_header: Option<&str>) -> Self {
        Self {
            url: url.into(),
            session_id: cookie_header.and_then(|h| cookie_value(h, Self::SESSION_COOKIE)),
            autoplay: query.is_some_and(has_autoplay_param),
            tab: query.and_then(tab_param),
        }
    }
}

fn cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_string())
    })
}

// Presence is enough: `?autoplay`, `?autoplay=`, `?autoplay=0` all count.
fn has_autoplay_param(query: &str) -> bool {
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "autoplay")
}

fn tab_param(query: &str) -> Option<usize> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "tab")
        .and_then(|(_, value)| value.trim().parse().ok())
}
