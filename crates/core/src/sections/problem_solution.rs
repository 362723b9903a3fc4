use chrono::NaiveDate;
use maud::{html, Markup};

use crate::domain::page::{PageRequest, PageViewModel};
use crate::sections::images::{image_url, srcset};
use crate::sections::RenderContext;

pub const TAB_LABELS: [&str; 3] = ["部落格", "個人教練", "團體教練"];

const BLOG_TOPICS: [&str; 7] = [
    "職涯發展",
    "網站架設",
    "團隊合作",
    "軟體開發",
    "Frontend",
    "Backend",
    "DevOps",
];

const PANEL_IMAGES: [&str; 3] = ["kos/illustrations/skis", "kos/illustrations/onewheel", "kos/illustrations/kayak"];

const INSTAGRAM_URL: &str = "https://www.instagram.com/koshuang/";

/// Selected tab index. Starts at 0; only valid indexes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabSelection {
    active: usize,
}

impl TabSelection {
    /// Starts from `?tab=N` when it names a valid tab, otherwise the first tab.
    pub fn from_request(request: &PageRequest) -> Self {
        let mut tabs = Self::default();
        if let Some(index) = request.tab {
            tabs.select(index);
        }
        tabs
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == index
    }

    /// Returns false and keeps the current tab when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= TAB_LABELS.len() {
            return false;
        }
        self.active = index;
        true
    }
}

/// Whole years since coaching started (end of 2020).
pub fn years_coaching(today: NaiveDate) -> u32 {
    NaiveDate::from_ymd_opt(2020, 12, 31)
        .and_then(|start| today.years_since(start))
        .unwrap_or(0)
}

fn panel(ctx: &RenderContext, tabs: &TabSelection, index: usize, body: Markup) -> Markup {
    let image_id = PANEL_IMAGES[index];
    html! {
        div.tab-panel role="tabpanel" data-tab-index=(index) hidden[!tabs.is_active(index)] {
            img."mb-6"."h-44"."lg:mb-14"
                src=(image_url(&ctx.image_base_url, image_id, 360))
                srcset=(srcset(&ctx.image_base_url, image_id, &[180, 360, 540]))
                sizes="11rem"
                alt="";
            (body)
        }
    }
}

fn coaching_list(items: &[&str]) -> Markup {
    html! {
        ul {
            @for item in items {
                li { (item) }
            }
        }
    }
}

pub fn render(ctx: &RenderContext, vm: &PageViewModel, tabs: &TabSelection) -> Markup {
    let years = years_coaching(ctx.today);
    let intro = format!("過去 {years} 年，我每週六都會花兩小時帶一些初學者，當軟體教練或導師。內容如下：");

    let blog = html! {
        h3 { "豐富的部落格" }
        p."mt-8" {
            "目前網站有 "
            strong { (vm.blog_post_count) }
            " 篇文章。總共被" (vm.total_blog_readers) "人閱讀了" (vm.total_blog_reads) "次。"
            @if let Some(team) = vm.current_blog_leader_team {
                " 目前閱讀量領先的是 "
                span.team data-team=(team.as_str()) { (team.as_str()) }
                " 隊。"
            }
            " 你會在部落格找到關於"
            @for (i, topic) in BLOG_TOPICS.iter().enumerate() {
                @if i > 0 { "、" }
                a href=(format!("/blog?q={topic}")) { (topic) }
            }
            " 與"
            a href="/blog" { "更多文章" }
            "。"
        }
        a.arrow-link."mt-14" href="/blog" { "開始閱讀 →" }
    };

    let personal = html! {
        h3 { "個人教練" }
        div."mt-8" {
            p { (intro) }
            (coaching_list(&[
                "與每位學員討論技能樹，持續培養及訓練下一階段的能力",
                "討論合適的 Side Project 主題",
                "討論職涯發展、面試",
                "討論軟體開發工程實踐",
            ]))
        }
        a.arrow-link."mt-14" href=(INSTAGRAM_URL) { "請至 IG 私訊，有提供免費兩次諮詢喔 →" }
    };

    let group = html! {
        h3 { "團體教練" }
        div."mt-8" {
            p { (intro) }
            (coaching_list(&[
                "與每位學員討論技能樹，持續培養及訓練下一階段的能力",
                "討論合適的 Side Project 主題並共同開發",
                "引導團隊成員互相分享工作遇到的各種難題，並互相切磋想法",
                "討論職涯發展、面試",
                "討論軟體開發工程實踐",
            ]))
        }
        a.arrow-link."mt-14" href=(INSTAGRAM_URL) { "請至 IG 私訊，有提供免費兩次諮詢喔 →" }
    };

    html! {
        section #tabs .grid.tabs data-active-tab=(tabs.active()) {
            div."col-span-full"."lg:col-span-5" {
                h2."mb-4"."lg:mb-0" { "身為軟體工程師的你，感覺職涯遇到了瓶頸嗎?" }
            }
            div."col-span-full"."lg:col-span-5"."lg:col-start-7" {
                p.h2.secondary {
                    "透過收錄在這個網站上的豐富文章內容，我們致力於提供專業的職涯建議、技能技巧分享，幫助你克服職涯上的各種瓶頸，實現更好的自我。"
                }
            }
            hr;
            div.tab-list role="tablist" {
                @for (index, label) in TAB_LABELS.iter().enumerate() {
                    a.tab href=(format!("?tab={index}#tabs")) role="tab" data-tab-index=(index)
                        aria-selected=(tabs.is_active(index).to_string()) {
                        span { (label) }
                    }
                }
            }
            div.tab-panels {
                (panel(ctx, tabs, 0, blog))
                (panel(ctx, tabs, 1, personal))
                (panel(ctx, tabs, 2, group))
            }
        }
    }
}
