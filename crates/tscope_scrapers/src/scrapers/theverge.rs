use super::{LinkRule, SiteProfile};

pub const PROFILE: SiteProfile = SiteProfile {
    name: "The Verge",
    cli_name: "theverge",
    base_url: "https://www.theverge.com/",
    links: LinkRule {
        selector: "a[href^='https://www.theverge.com/']",
        href_prefix: Some("https://www.theverge.com/"),
        join_base: false,
        contains: Some("/202"),
        strip_query: true,
    },
    title_fallback: "No title",
    author_selector: "span.byline__name",
    body_selector: "div.duet--article--article-body-components-container",
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::fetcher::mock::MockFetcher;
    use crate::fetcher::ScraperConfig;
    use crate::scrapers::{Scraper, SiteScraper};
    use super::*;

    #[tokio::test]
    async fn test_links_drop_query_and_undated_pages() {
        let homepage = r#"
            <a href="https://www.theverge.com/2024/5/1/24146/apple-ipad?utm_source=home">iPad</a>
            <a href="https://www.theverge.com/2024/5/1/24146/apple-ipad">iPad again</a>
            <a href="https://www.theverge.com/tech">Tech</a>
            <a href="/2024/5/2/relative">Relative</a>"#;
        let fetcher = MockFetcher::new()
            .with_page("https://www.theverge.com/robots.txt", 200, "")
            .with_page("https://www.theverge.com/", 200, homepage);
        let scraper = SiteScraper::new(PROFILE, Arc::new(fetcher), ScraperConfig::default());
        assert_eq!(
            scraper.get_article_links().await,
            vec!["https://www.theverge.com/2024/5/1/24146/apple-ipad".to_string()]
        );
    }
}
