use maud::{html, Markup};

use crate::domain::page::PageViewModel;
use crate::sections::images::{flying_kody_id, image_url, srcset};
use crate::sections::RenderContext;

pub fn render(ctx: &RenderContext, vm: &PageViewModel) -> Markup {
    let image_id = flying_kody_id(vm.resolved_team, vm.random_seed);

    html! {
        section.hero {
            div.hero-image {
                img
                    src=(image_url(&ctx.image_base_url, &image_id, 1100))
                    srcset=(srcset(&ctx.image_base_url, &image_id, &[512, 650, 840, 1100, 1300, 1650]))
                    sizes="(max-width: 1023px) 80vw, (min-width: 1024px) and (max-width: 1620px) 40vw, 650px"
                    alt="Flying Kody"
                    data-team=(vm.resolved_team.as_str());
            }
            div.hero-content {
                h1 {
                    "軟體工程師的成長夥伴："
                    br;
                    "軟體教練/導師課，提供客製化指導、豐富學習資源！"
                }
                div."mr-auto"."flex"."flex-col"."gap-4" {
                    a.button.primary href="/blog" { "閱讀部落格" }
                    a.button.secondary href="/courses" { "我在尋找教練與導師" }
                }
            }
            a.arrow-link href="#intro" aria-label="更多 Kos 的介紹" { "↓" }
        }
    }
}
