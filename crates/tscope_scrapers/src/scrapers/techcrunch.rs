use super::{LinkRule, SiteProfile};

pub const PROFILE: SiteProfile = SiteProfile {
    name: "TechCrunch",
    cli_name: "techcrunch",
    base_url: "https://techcrunch.com/",
    links: LinkRule {
        selector: "a.post-block__title__link",
        href_prefix: Some("https://techcrunch.com/"),
        join_base: false,
        contains: None,
        strip_query: false,
    },
    title_fallback: "No title",
    author_selector: "a[rel~='author']",
    body_selector: "div.article-content",
};
