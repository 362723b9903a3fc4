use maud::{html, Markup};

use crate::domain::page::PageRequest;
use crate::sections::images::{image_url, srcset};
use crate::sections::RenderContext;

const VIDEO_ID: &str = "a7VxBwLGcDE";
const THUMBNAIL_ID: &str = "kos/get-to-know-kos-thumbnail";

/// The autoplay flag is fixed when the section is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntroductionSection {
    autoplay: bool,
}

impl IntroductionSection {
    pub fn from_request(request: &PageRequest) -> Self {
        Self {
            autoplay: request.autoplay,
        }
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn embed_url(&self) -> String {
        let mut url = format!(
            "https://www.youtube-nocookie.com/embed/{VIDEO_ID}?color=white&playsinline=0&rel=0"
        );
        if self.autoplay {
            url.push_str("&autoplay=1");
        }
        url
    }

    pub fn render(&self, ctx: &RenderContext) -> Markup {
        html! {
            section.grid {
                div."col-span-full"."lg:col-span-4" {
                    figure.video-embed data-autoplay=(self.autoplay.to_string()) {
                        img.rounded-lg."object-cover"."w-full"
                            src=(image_url(&ctx.image_base_url, THUMBNAIL_ID, 900))
                            srcset=(srcset(&ctx.image_base_url, THUMBNAIL_ID, &[256, 550, 700, 900, 1300, 1800]))
                            sizes="(max-width: 320px) 256px, (min-width: 321px) and (max-width: 1023px) 80vw, (min-width: 1024px) 410px, 850px"
                            alt="Get to know Kos Huang";
                        iframe
                            src=(self.embed_url())
                            title="Get to know Kos Huang"
                            allow="autoplay; encrypted-media; picture-in-picture"
                            allowfullscreen {}
                    }
                }
                div."col-span-full"."mt-12"."lg:col-span-6"."lg:col-start-6"."lg:mt-0" {
                    h2 #intro { "我是 Kos，我喜歡幫助別人成為更好的軟體工程師" }
                    div.secondary."mt-12" {
                        p { "過去兩三年，我每週六都會花兩小時，擔任軟體教練或導師「免費」帶一些初學者學習。" }
                        p { "我希望可以持續幫助別人，但為了品質，決定改成付費的教練導師課程。" }
                    }
                    a.arrow-link."mt-20" href="/about" { "關於我更多的資訊 →" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::tests::ctx;

    #[test]
    fn autoplay_comes_from_query_presence() {
        let on = IntroductionSection::from_request(&PageRequest::new("/", Some("autoplay"), None));
        let off = IntroductionSection::from_request(&PageRequest::new("/", None, None));
        assert!(on.autoplay());
        assert!(!off.autoplay());
        assert!(on.embed_url().ends_with("&autoplay=1"));
        assert!(!off.embed_url().contains("autoplay"));
    }

    #[test]
    fn renders_intro_anchor_and_embed() {
        let section = IntroductionSection::from_request(&PageRequest::default());
        let html = section.render(&ctx()).into_string();
        assert!(html.contains(r#"<h2 id="intro">"#));
        assert!(html.contains(r#"data-autoplay="false""#));
        assert!(html.contains("youtube-nocookie.com/embed/a7VxBwLGcDE"));
    }
}
