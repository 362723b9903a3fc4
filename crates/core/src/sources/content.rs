use crate::config::Settings;
use crate::domain::post::PostSummary;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PATH: &str = "/v1/posts";
const DEFAULT_RETRIES: u32 = 3;

/// Fetches the blog post list from the content service.
#[derive(Debug, Clone)]
pub struct ContentApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    path: String,
    retries: u32,
}

impl ContentApiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_content_api_base_url()?.to_string();
        let api_key = settings.content_api_key.clone();

        let timeout_secs = std::env::var("CONTENT_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retries = std::env::var("CONTENT_API_RETRIES")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_RETRIES);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build content api http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
            path: DEFAULT_PATH.to_string(),
            retries,
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(api_key) = &self.api_key {
            headers.insert("x-api-key", HeaderValue::from_str(api_key)?);
        }
        Ok(headers)
    }

    async fn fetch_once(&self) -> Result<Vec<PostSummary>> {
        let res = self
            .http
            .get(self.url())
            .headers(self.headers()?)
            .send()
            .await
            .context("content api request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read content api response")?;

        if !status.is_success() {
            anyhow::bail!("content api HTTP {status}: {text}");
        }

        parse_posts(&text)
    }

    pub async fn fetch_posts(&self) -> Result<Vec<PostSummary>> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.fetch_once().await {
                Ok(posts) => return Ok(posts),
                Err(err) => {
                    if attempt >= self.retries.max(1) {
                        return Err(err);
                    }
                    let backoff = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(attempt, ?backoff, error = %err, "content api fetch failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

fn parse_posts(text: &str) -> Result<Vec<PostSummary>> {
    let posts = serde_json::from_str::<Vec<PostSummary>>(text)
        .context("content api response is not a post list")?;
    for post in &posts {
        anyhow::ensure!(!post.slug.trim().is_empty(), "post slug must be non-empty");
        anyhow::ensure!(
            !post.title.trim().is_empty(),
            "post title must be non-empty (slug={})",
            post.slug
        );
    }
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_post_list_with_optional_fields() {
        let v = json!([
            {
                "slug": "career-plateau",
                "title": "突破職涯瓶頸",
                "description": "What to do next",
                "date": "2024-03-01",
                "reads": 1200
            },
            { "slug": "rust-intro", "title": "Rust 入門" }
        ]);

        let posts = parse_posts(&v.to_string()).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].reads, Some(1200));
        assert_eq!(posts[1].description, None);
        assert_eq!(posts[1].path(), "/blog/rust-intro");
    }

    #[test]
    fn rejects_blank_slug() {
        let v = json!([{ "slug": " ", "title": "x" }]);
        assert!(parse_posts(&v.to_string()).is_err());
    }

    #[test]
    fn rejects_non_list_payload() {
        assert!(parse_posts("{\"posts\": []}").is_err());
    }
}
