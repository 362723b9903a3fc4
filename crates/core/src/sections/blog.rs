use maud::{html, Markup};

use crate::domain::post::PostSummary;
use crate::sections::images::image_url;
use crate::sections::RenderContext;

pub fn render(ctx: &RenderContext, articles: &[PostSummary], title: &str, description: &str) -> Markup {
    html! {
        section.grid.blog-section {
            header."col-span-full" {
                h2 { (title) }
                p.secondary { (description) }
                a.arrow-link href="/blog" { "看所有文章 →" }
            }
            @if articles.is_empty() {
                p.empty."col-span-full" { "目前沒有推薦的文章。" }
            } @else {
                ul.article-list."col-span-full" {
                    @for article in articles {
                        li.article-card {
                            a href=(article.path()) {
                                @if let Some(banner) = &article.banner_url {
                                    img src=(image_url(&ctx.image_base_url, banner, 550)) alt="";
                                }
                                h3 { (article.title) }
                                @if let Some(date) = article.date {
                                    time datetime=(date.to_string()) { (date.format("%Y-%m-%d").to_string()) }
                                }
                                @if let Some(description) = &article.description {
                                    p { (description) }
                                }
                                @if let Some(reads) = article.reads {
                                    span.reads { (crate::format::format_number(reads)) " 次閱讀" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::post;
    use crate::sections::tests::ctx;

    #[test]
    fn lists_articles_with_links() {
        let mut first = post("career-plateau");
        first.reads = Some(12_345);
        let html = render(&ctx(), &[first, post("rust-intro")], "部落格推薦", "特別為你而準備")
            .into_string();
        assert!(html.contains(r#"href="/blog/career-plateau""#));
        assert!(html.contains("Title rust-intro"));
        assert!(html.contains("12,345 次閱讀"));
        assert!(html.contains("特別為你而準備"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let html = render(&ctx(), &[], "部落格推薦", "").into_string();
        assert!(html.contains("目前沒有推薦的文章"));
        assert!(!html.contains("article-card"));
    }
}
