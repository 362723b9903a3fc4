//! Server-rendered sections of the index page.

use chrono::NaiveDate;
use maud::{html, Markup, DOCTYPE};

use crate::domain::page::{PageRequest, PageViewModel};
use crate::seo::MetaEntry;

pub mod blog;
pub mod hero;
pub mod images;
pub mod introduction;
pub mod problem_solution;

/// Static inputs shared by all sections of one render.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub image_base_url: String,
    pub today: NaiveDate,
}

pub fn render_head(metas: &[MetaEntry]) -> Markup {
    html! {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width,initial-scale=1";
        @for entry in metas {
            @if entry.name == "title" {
                title { (entry.content) }
            } @else if entry.name.starts_with("og:") {
                meta property=(entry.name) content=(entry.content);
            } @else {
                meta name=(entry.name) content=(entry.content);
            }
        }
    }
}

pub fn render_index_page(
    ctx: &RenderContext,
    request: &PageRequest,
    vm: &PageViewModel,
    metas: &[MetaEntry],
) -> Markup {
    let intro = introduction::IntroductionSection::from_request(request);
    let tabs = problem_solution::TabSelection::from_request(request);

    html! {
        (DOCTYPE)
        html lang="zh-Hant" {
            head { (render_head(metas)) }
            body {
                div {
                    (hero::render(ctx, vm))
                    main {
                        (intro.render(ctx))
                        div.spacer-lg {}
                        (problem_solution::render(ctx, vm, &tabs))
                        div.spacer-base {}
                        (blog::render(ctx, &vm.blog_recommendations, "部落格推薦", "特別為你而準備"))
                    }
                }
            }
        }
    }
}

/// Generic error page for `status`. Never includes error details.
pub fn render_server_error(status: u16) -> Markup {
    let message = match status {
        503 => "服務暫時無法使用",
        _ => "糟糕，伺服器出了點問題",
    };
    let heading = format!("{status} - {message}");

    html! {
        (DOCTYPE)
        html lang="zh-Hant" {
            head {
                meta charset="utf-8";
                title { (heading) }
            }
            body {
                main.error {
                    h1 { (heading) }
                    p { "請稍後再試一次。" }
                    a href="/" { "回到首頁" }
                }
            }
        }
    }
}
