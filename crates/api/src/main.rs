use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kos_core::domain::page::PageRequest;
use kos_core::loader::{build_page_view_model, PageLoad};
use kos_core::random::{RandomSource, ThreadRandom};
use kos_core::sections::{render_index_page, render_server_error, RenderContext};
use kos_core::seo::{build_social_metas, CloudinarySocialImage, MetaEntry, SocialMetaInput};
use kos_core::sources::content::ContentApiClient;
use kos_core::sources::site::SiteDataSources;

const SERVER_TIMING: HeaderName = HeaderName::from_static("server-timing");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = kos_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let sources = match connect_sources(&settings).await {
        Ok(sources) => Some(Arc::new(sources)),
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "data sources unavailable; starting in degraded mode");
            None
        }
    };

    let state = AppState {
        sources,
        random: Arc::new(ThreadRandom),
        images: Arc::new(CloudinarySocialImage::new(settings.social_image_base_url.clone())),
        site_url: settings.site_url.trim_end_matches('/').to_string(),
        image_base_url: settings.social_image_base_url.clone(),
    };

    let app = Router::new()
        .route("/", get(index))
        .route("/_data/index", get(index_data))
        .route("/healthz", get(healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn connect_sources(settings: &kos_core::config::Settings) -> anyhow::Result<SiteDataSources> {
    let db_url = settings.require_database_url()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;
    kos_core::storage::migrate(&pool).await?;

    let content = ContentApiClient::from_settings(settings)?;
    Ok(SiteDataSources::new(pool, content))
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    sources: Option<Arc<SiteDataSources>>,
    random: Arc<dyn RandomSource>,
    images: Arc<CloudinarySocialImage>,
    site_url: String,
    image_base_url: String,
}

impl AppState {
    fn page_request(&self, uri: &Uri, headers: &HeaderMap) -> PageRequest {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok());
        PageRequest::new(format!("{}{}", self.site_url, uri.path()), uri.query(), cookie)
    }

    fn social_metas(&self, request: &PageRequest) -> Vec<MetaEntry> {
        build_social_metas(
            SocialMetaInput {
                url: request.url.clone(),
                ..Default::default()
            },
            self.images.as_ref(),
        )
    }

    async fn load(&self, request: &PageRequest) -> Result<PageLoad, StatusCode> {
        let Some(sources) = &self.sources else {
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        };

        let sources = sources.per_request();
        build_page_view_model(request, &sources, self.random.as_ref())
            .await
            .map_err(|e| {
                let err = anyhow::Error::new(e);
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "index page load failed");
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}

async fn index(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let request = state.page_request(&uri, &headers);
    let load = match state.load(&request).await {
        Ok(load) => load,
        Err(status) => return server_error(status),
    };

    let ctx = RenderContext {
        image_base_url: state.image_base_url.clone(),
        today: chrono::Utc::now().date_naive(),
    };
    let metas = state.social_metas(&request);
    let body = render_index_page(&ctx, &request, &load.view_model, &metas).into_string();
    with_page_headers(Html(body).into_response(), &load)
}

async fn index_data(State(state): State<AppState>, uri: Uri, headers: HeaderMap) -> Response {
    let request = state.page_request(&uri, &headers);
    let load = match state.load(&request).await {
        Ok(load) => load,
        Err(status) => return (status, Json(json!({ "error": "server error" }))).into_response(),
    };

    let metas = state.social_metas(&request);
    let body = Json(json!({
        "view_model": &load.view_model,
        "metas": metas,
    }));
    with_page_headers(body.into_response(), &load)
}

fn with_page_headers(mut response: Response, load: &PageLoad) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(load.headers.cache_control),
    );
    headers.insert(header::VARY, HeaderValue::from_static(load.headers.vary));
    match HeaderValue::from_str(&load.headers.server_timing) {
        Ok(v) => {
            headers.insert(SERVER_TIMING, v);
        }
        Err(e) => tracing::warn!(error = %e, "invalid server-timing header; skipping"),
    }
    response
}

fn server_error(status: StatusCode) -> Response {
    (status, Html(render_server_error(status.as_u16()).into_string())).into_response()
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &kos_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kos_core::domain::page::PageViewModel;
    use kos_core::domain::team::Team;
    use kos_core::loader::ResponseMeta;
    use kos_core::random::FixedRandom;

    fn state() -> AppState {
        AppState {
            sources: None,
            random: Arc::new(FixedRandom(0.0)),
            images: Arc::new(CloudinarySocialImage::new("https://img.test/upload")),
            site_url: "https://kos.dev".to_string(),
            image_base_url: "https://img.test/upload".to_string(),
        }
    }

    fn load() -> PageLoad {
        PageLoad {
            view_model: PageViewModel {
                blog_post_count: "1".to_string(),
                total_blog_readers: "很多".to_string(),
                total_blog_reads: "很多".to_string(),
                current_blog_leader_team: None,
                blog_recommendations: Vec::new(),
                resolved_team: Team::Red,
                random_seed: 0.0,
            },
            headers: ResponseMeta {
                cache_control: "private, max-age=3600",
                vary: "Cookie",
                server_timing: "user;dur=1.0,posts;dur=2.5".to_string(),
            },
        }
    }

    #[test]
    fn builds_page_request_from_uri_and_cookie() {
        let uri: Uri = "/?autoplay".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("kos_session=abc"));

        let request = state().page_request(&uri, &headers);
        assert_eq!(request.url, "https://kos.dev/");
        assert!(request.autoplay);
        assert_eq!(request.session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn attaches_cache_and_timing_headers() {
        let response = with_page_headers(Html("ok").into_response(), &load());
        let headers = response.headers();
        assert_eq!(headers[header::CACHE_CONTROL], "private, max-age=3600");
        assert_eq!(headers[header::VARY], "Cookie");
        assert_eq!(headers["server-timing"], "user;dur=1.0,posts;dur=2.5");
    }

    #[tokio::test]
    async fn degraded_mode_is_service_unavailable() {
        let request = PageRequest::default();
        assert_eq!(state().load(&request).await.unwrap_err(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn degraded_error_page_matches_status() {
        let response = server_error(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("503"));
        assert!(!body.contains("500"));
    }

    #[test]
    fn social_metas_use_request_url() {
        let request = PageRequest::new("https://kos.dev/", None, None);
        let metas = state().social_metas(&request);
        assert_eq!(metas.len(), 14);
        assert_eq!(metas[4].name, "og:url");
        assert_eq!(metas[4].content, "https://kos.dev/");
    }
}
