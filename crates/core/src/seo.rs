use serde::Serialize;

pub const DEFAULT_TITLE: &str =
    "軟體工程師的成長夥伴：軟體教練/導師課，提供客製化指導、豐富學習資源！";
pub const DEFAULT_DESCRIPTION: &str = "Make the world better with software";
pub const DEFAULT_FEATURED_IMAGE: &str = "kos/kody/flying-snowboarding-blue";
pub const TWITTER_HANDLE: &str = "@kentcdodds";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaEntry {
    pub name: &'static str,
    pub content: String,
}

impl MetaEntry {
    fn new(name: &'static str, content: impl Into<String>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SocialMetaInput {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialImageArgs<'a> {
    pub url: &'a str,
    pub words: &'a str,
    pub featured_image: &'a str,
}

pub trait SocialImageGenerator: Send + Sync {
    fn generic_social_image(&self, args: &SocialImageArgs<'_>) -> String;
}

/// Builds Cloudinary text-overlay URLs.
#[derive(Debug, Clone)]
pub struct CloudinarySocialImage {
    base_url: String,
}

impl CloudinarySocialImage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl SocialImageGenerator for CloudinarySocialImage {
    fn generic_social_image(&self, args: &SocialImageArgs<'_>) -> String {
        let display_url = args
            .url
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        [
            self.base_url.clone(),
            "$th_1256,$tw_2400,$gw_$tw_div_24,$gh_$th_div_12".to_string(),
            format!(
                "co_white,c_fit,g_north_west,w_$gw_mul_10,h_$gh_mul_7,x_$gw_mul_1.3,y_$gh_mul_1.5,l_text:NotoSansTC-Regular.otf_110:{}",
                double_encode(args.words)
            ),
            format!(
                "c_fit,g_east,w_$gw_mul_11,h_$gh_mul_11,x_$gw,l_{}",
                args.featured_image.replace('/', ":")
            ),
            format!(
                "co_rgb:a9adc1,c_fit,g_north_west,w_$gw_mul_5.5,h_$gh_mul_4,x_$gw_mul_1.3,y_$gh_mul_9,l_text:NotoSansTC-Regular.otf_50:{}",
                double_encode(display_url)
            ),
            "c_fill,w_$tw,h_$th/kos/social-background.png".to_string(),
        ]
        .join("/")
    }
}

fn encode_component(s: &str) -> String {
    // form encoding writes spaces as '+', but a literal '+' is already escaped as %2B.
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

// Cloudinary decodes text overlays once more than the URL itself.
fn double_encode(s: &str) -> String {
    encode_component(&encode_component(s))
}

/// Head and social-sharing metas, in render order. Always 14 entries.
pub fn build_social_metas(
    input: SocialMetaInput,
    images: &dyn SocialImageGenerator,
) -> Vec<MetaEntry> {
    let title = input.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = input
        .description
        .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
    let image = input.image.unwrap_or_else(|| {
        images.generic_social_image(&SocialImageArgs {
            url: &input.url,
            words: &title,
            featured_image: DEFAULT_FEATURED_IMAGE,
        })
    });
    let keywords = input.keywords.unwrap_or_default();
    let card = if image.is_empty() {
        "summary"
    } else {
        "summary_large_image"
    };

    vec![
        MetaEntry::new("title", title.clone()),
        MetaEntry::new("description", description.clone()),
        MetaEntry::new("keywords", keywords),
        MetaEntry::new("image", image.clone()),
        MetaEntry::new("og:url", input.url),
        MetaEntry::new("og:title", title.clone()),
        MetaEntry::new("og:description", description.clone()),
        MetaEntry::new("og:image", image.clone()),
        MetaEntry::new("twitter:card", card),
        MetaEntry::new("twitter:creator", TWITTER_HANDLE),
        MetaEntry::new("twitter:site", TWITTER_HANDLE),
        MetaEntry::new("twitter:title", title),
        MetaEntry::new("twitter:description", description),
        MetaEntry::new("twitter:image", image),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoImages;

    impl SocialImageGenerator for EchoImages {
        fn generic_social_image(&self, args: &SocialImageArgs<'_>) -> String {
            format!("img:{}:{}", args.featured_image, args.words)
        }
    }

    fn content<'a>(metas: &'a [MetaEntry], name: &str) -> &'a str {
        metas
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.content.as_str())
            .unwrap()
    }

    #[test]
    fn defaults_produce_fourteen_ordered_entries() {
        let metas = build_social_metas(
            SocialMetaInput {
                url: "https://x.test/".to_string(),
                ..Default::default()
            },
            &EchoImages,
        );

        let names: Vec<_> = metas.iter().map(|m| m.name).collect();
        assert_eq!(
            names,
            vec![
                "title",
                "description",
                "keywords",
                "image",
                "og:url",
                "og:title",
                "og:description",
                "og:image",
                "twitter:card",
                "twitter:creator",
                "twitter:site",
                "twitter:title",
                "twitter:description",
                "twitter:image",
            ]
        );
        assert_eq!(content(&metas, "title"), DEFAULT_TITLE);
        assert_eq!(content(&metas, "keywords"), "");
        assert_eq!(content(&metas, "og:url"), "https://x.test/");
        assert_eq!(
            content(&metas, "image"),
            format!("img:{DEFAULT_FEATURED_IMAGE}:{DEFAULT_TITLE}")
        );
        assert_eq!(content(&metas, "twitter:card"), "summary_large_image");
    }

    #[test]
    fn empty_image_uses_summary_card() {
        let metas = build_social_metas(
            SocialMetaInput {
                url: "https://x.test/".to_string(),
                image: Some(String::new()),
                ..Default::default()
            },
            &EchoImages,
        );
        assert_eq!(metas.len(), 14);
        assert_eq!(content(&metas, "twitter:card"), "summary");
    }

    #[test]
    fn explicit_fields_flow_through() {
        let metas = build_social_metas(
            SocialMetaInput {
                url: "https://x.test/blog".to_string(),
                title: Some("Blog".to_string()),
                description: Some("Posts".to_string()),
                keywords: Some("rust,career".to_string()),
                image: None,
            },
            &EchoImages,
        );
        assert_eq!(content(&metas, "twitter:title"), "Blog");
        assert_eq!(content(&metas, "og:description"), "Posts");
        assert_eq!(content(&metas, "keywords"), "rust,career");
        assert_eq!(content(&metas, "og:image"), format!("img:{DEFAULT_FEATURED_IMAGE}:Blog"));
    }

    #[test]
    fn cloudinary_url_double_encodes_overlay_text() {
        let images = CloudinarySocialImage::new("https://res.cloudinary.com/kos/image/upload/");
        let url = images.generic_social_image(&SocialImageArgs {
            url: "https://kos.dev/blog",
            words: "a b",
            featured_image: "kos/kody/x",
        });
        assert!(url.starts_with("https://res.cloudinary.com/kos/image/upload/$th_1256"));
        assert!(url.contains("_110:a%2520b/"));
        assert!(url.contains("l_kos:kody:x"));
        assert!(url.contains("kos.dev%252Fblog"));
        assert!(url.ends_with("/kos/social-background.png"));
    }
}
