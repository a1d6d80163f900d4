use super::{LinkRule, SiteProfile};

pub const PROFILE: SiteProfile = SiteProfile {
    name: "Ars Technica",
    cli_name: "arstechnica",
    base_url: "https://arstechnica.com/",
    links: LinkRule {
        selector: "a[href]",
        href_prefix: Some("/"),
        join_base: true,
        contains: Some("/202"),
        strip_query: false,
    },
    title_fallback: "No Title",
    author_selector: "a[rel~='author']",
    body_selector: "div.article-content",
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::fetcher::mock::MockFetcher;
    use crate::fetcher::ScraperConfig;
    use crate::scrapers::{Scraper, SiteScraper};
    use super::*;

    #[tokio::test]
    async fn test_only_relative_dated_links() {
        let homepage = r#"
            <a href="/gadgets/2024/05/new-laptop/">Laptop</a>
            <a href="https://arstechnica.com/science/2024/05/absolute/">Absolute</a>
            <a href="/about/">About</a>"#;
        let fetcher = MockFetcher::new()
            .with_page("https://arstechnica.com/robots.txt", 404, "")
            .with_page("https://arstechnica.com/", 200, homepage);
        let scraper = SiteScraper::new(PROFILE, Arc::new(fetcher), ScraperConfig::default());
        assert_eq!(
            scraper.get_article_links().await,
            vec!["https://arstechnica.com/gadgets/2024/05/new-laptop/".to_string()]
        );
    }
}
