use super::{LinkRule, SiteProfile};

pub const PROFILE: SiteProfile = SiteProfile {
    name: "Wired",
    cli_name: "wired",
    base_url: "https://www.wired.com/",
    links: LinkRule {
        selector: "a[data-test-id='article-link']",
        href_prefix: None,
        join_base: true,
        contains: Some("/202"),
        strip_query: false,
    },
    title_fallback: "No Title",
    author_selector: "a.byline-component__link",
    body_selector: "article",
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::fetcher::mock::MockFetcher;
    use crate::fetcher::ScraperConfig;
    use crate::scrapers::SiteScraper;
    use super::*;

    #[test]
    fn test_parse_article() {
        let html = r#"
            <a class="byline-component__link">Lily Hay Newman</a>
            <article><p>Body one.</p><div><p>Body two.</p></div></article>"#;
        let scraper = SiteScraper::new(PROFILE, Arc::new(MockFetcher::new()), ScraperConfig::default());
        let article = scraper.parse_article("https://www.wired.com/story/x/", html).unwrap();
        assert_eq!(article.title, "No Title");
        assert_eq!(article.author.as_deref(), Some("Lily Hay Newman"));
        assert_eq!(article.content, "Body one.\nBody two.");
    }
}
