use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kos_core::domain::page::PageRequest;
use kos_core::random::{FixedRandom, RandomSource, ThreadRandom};
use kos_core::seo::{build_social_metas, CloudinarySocialImage, SocialMetaInput};
use kos_core::sources::content::ContentApiClient;
use kos_core::sources::site::SiteDataSources;

#[derive(Debug, Parser)]
#[command(name = "kos_worker")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert stub blog reads spread across teams and posts.
    Seed {
        /// Number of reads to insert (1..=5000).
        #[arg(long, default_value_t = 500)]
        size: usize,

        /// Post slugs to attribute reads to. Defaults to the content api post list.
        #[arg(long = "slug")]
        slugs: Vec<String>,

        /// Do everything except writing to the database.
        #[arg(long)]
        dry_run: bool,
    },
    /// Load the index page data once and print it as JSON.
    Preview {
        #[arg(long)]
        autoplay: bool,

        /// Session id to load the page as.
        #[arg(long)]
        session: Option<String>,

        /// Fixed random value in [0, 1) instead of a fresh one.
        #[arg(long)]
        random: Option<f64>,
    },
}

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

    let args = Args::parse();

    let res = match args.command {
        Command::Seed {
            size,
            slugs,
            dry_run,
        } => seed(&settings, size, slugs, dry_run).await,
        Command::Preview {
            autoplay,
            session,
            random,
        } => preview(&settings, autoplay, session, random).await,
    };

    if let Err(err) = &res {
        sentry_anyhow::capture_anyhow(err);
    }
    res
}

async fn connect(settings: &kos_core::config::Settings) -> anyhow::Result<sqlx::PgPool> {
    let db_url = settings.require_database_url()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .context("connect DATABASE_URL failed")?;
    kos_core::storage::migrate(&pool).await?;
    Ok(pool)
}

async fn seed(
    settings: &kos_core::config::Settings,
    size: usize,
    slugs: Vec<String>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let slugs = if slugs.is_empty() {
        ContentApiClient::from_settings(settings)?
            .fetch_posts()
            .await?
            .into_iter()
            .map(|p| p.slug)
            .collect()
    } else {
        slugs
    };

    if dry_run {
        tracing::info!(size, slugs_len = slugs.len(), dry_run = true, "seed stub reads (dry-run)");
        return Ok(());
    }

    let pool = connect(settings).await?;
    let inserted = kos_core::storage::seed::seed_stub_reads(&pool, &slugs, size).await?;
    tracing::info!(inserted, slugs_len = slugs.len(), "seeded stub reads");
    Ok(())
}

async fn preview(
    settings: &kos_core::config::Settings,
    autoplay: bool,
    session: Option<String>,
    random: Option<f64>,
) -> anyhow::Result<()> {
    if let Some(v) = random {
        anyhow::ensure!((0.0..1.0).contains(&v), "--random must be in [0, 1) (got {v})");
    }

    let pool = connect(settings).await?;
    let sources = SiteDataSources::new(pool, ContentApiClient::from_settings(settings)?);

    let request = PageRequest {
        url: format!("{}/", settings.site_url.trim_end_matches('/')),
        session_id: session,
        autoplay,
        tab: None,
    };

    let rng: Box<dyn RandomSource> = match random {
        Some(v) => Box::new(FixedRandom(v)),
        None => Box::new(ThreadRandom),
    };

    let load = kos_core::loader::build_page_view_model(&request, &sources, rng.as_ref()).await?;
    let metas = build_social_metas(
        SocialMetaInput {
            url: request.url.clone(),
            ..Default::default()
        },
        &CloudinarySocialImage::new(settings.social_image_base_url.clone()),
    );

    let out = json!({
        "view_model": load.view_model,
        "metas": metas,
        "headers": load.headers,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
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

    #[test]
    fn parses_seed_with_repeated_slugs() {
        let args = Args::try_parse_from([
            "kos_worker", "seed", "--size", "10", "--slug", "a", "--slug", "b",
        ])
        .unwrap();
        match args.command {
            Command::Seed { size, slugs, dry_run } => {
                assert_eq!(size, 10);
                assert_eq!(slugs, vec!["a", "b"]);
                assert!(!dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_preview_flags() {
        let args = Args::try_parse_from([
            "kos_worker", "preview", "--autoplay", "--session", "abc", "--random", "0.25",
        ])
        .unwrap();
        match args.command {
            Command::Preview { autoplay, session, random } => {
                assert!(autoplay);
                assert_eq!(session.as_deref(), Some("abc"));
                assert_eq!(random, Some(0.25));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
