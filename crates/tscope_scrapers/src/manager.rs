use std::sync::Arc;
use tscope_core::{Article, Error, Fetcher, Result};
use crate::fetcher::ScraperConfig;
use crate::scrapers::{all_scrapers, Scraper};

type BoxedScraper = Box<dyn Scraper>;

/// Looks scrapers up by CLI name or URL and runs them one after another.
pub struct ScraperManager {
    scrapers: Vec<BoxedScraper>,
    config: ScraperConfig,
}

impl ScraperManager {
    /// A manager over every known site.
    pub fn new(fetcher: Arc<dyn Fetcher>, config: ScraperConfig) -> Self {
        let scrapers = all_scrapers(fetcher, &config)
            .into_iter()
            .map(|s| Box::new(s) as BoxedScraper)
            .collect();
        Self { scrapers, config }
    }

    pub fn with_scrapers(scrapers: Vec<BoxedScraper>, config: ScraperConfig) -> Self {
        Self { scrapers, config }
    }

    pub fn add_scraper(&mut self, scraper: BoxedScraper) {
        self.scrapers.push(scraper);
    }

    pub fn scrapers(&self) -> &[BoxedScraper] {
        &self.scrapers
    }

    pub fn get_scraper_for_url(&self, url: &str) -> Result<&dyn Scraper> {
        self.scrapers
            .iter()
            .find(|s| s.can_handle(url))
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::Scraping(format!("No scraper found for URL: {}", url)))
    }

    pub fn get_scraper(&self, name: &str) -> Result<&dyn Scraper> {
        let name = name.trim().to_lowercase();
        self.scrapers
            .iter()
            .find(|s| s.cli_names().contains(&name.as_str()) || s.source().to_lowercase() == name)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::Scraping(format!("No scraper found for {}", name)))
    }

    pub async fn scrape_url(&self, url: &str) -> Result<Article> {
        self.get_scraper_for_url(url)?.scrape_article(url).await
    }

    /// Scrape one named site, or every site in order when `source` is `None`.
    pub async fn scrape_source(&self, source: Option<&str>) -> Result<Vec<Article>> {
        let selected: Vec<&dyn Scraper> = match source {
            Some(name) => vec![self.get_scraper(name)?],
            None => self.scrapers.iter().map(|s| s.as_ref()).collect(),
        };

        let mut articles = Vec::new();
        for scraper in selected {
            tracing::info!("Scraping {}", scraper.source());
            articles.extend(scraper.scrape(self.config.limit, self.config.delay).await);
        }
        Ok(articles)
    }

    /// `(source, cli names)` for every registered scraper.
    pub fn list_scrapers(&self) -> Vec<(String, Vec<String>)> {
        self.scrapers
            .iter()
            .map(|s| {
                let names = s.cli_names().into_iter().map(str::to_string).collect();
                (s.source().to_string(), names)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use async_trait::async_trait;
    use crate::fetcher::mock::MockFetcher;

    struct MockScraper {
        name: &'static str,
        links: Vec<&'static str>,
    }

    #[async_trait]
    impl Scraper for MockScraper {
        fn source(&self) -> &str {
            self.name
        }

        fn can_handle(&self, url: &str) -> bool {
            url.contains(&self.name.to_lowercase())
        }

        fn cli_names(&self) -> Vec<&str> {
            vec!["mock"]
        }

        async fn get_article_links(&self) -> Vec<String> {
            self.links.iter().map(|l| l.to_string()).collect()
        }

        async fn scrape_article(&self, url: &str) -> Result<Article> {
            if url.ends_with("broken") {
                return Err(Error::Scraping("broken page".to_string()));
            }
            Ok(Article::new(url, "Mock story", self.name).with_content("Body"))
        }
    }

    fn config() -> ScraperConfig {
        ScraperConfig::default().with_delay(Duration::ZERO)
    }

    #[test]
    fn test_lookup() {
        let manager = ScraperManager::new(Arc::new(MockFetcher::new()), config());
        assert_eq!(manager.scrapers().len(), 4);
        assert_eq!(manager.get_scraper("theverge").unwrap().source(), "The Verge");
        assert_eq!(manager.get_scraper("TechCrunch").unwrap().source(), "TechCrunch");
        assert_eq!(
            manager.get_scraper_for_url("https://arstechnica.com/2024/05/x/").unwrap().source(),
            "Ars Technica"
        );
        assert!(manager.get_scraper("nope").is_err());
        assert!(manager.get_scraper_for_url("https://unknown.example/").is_err());
    }

    #[tokio::test]
    async fn test_scrape_source_skips_failures() {
        let scraper = MockScraper {
            name: "Mocksite",
            links: vec!["https://mocksite.example/1", "https://mocksite.example/broken", "https://mocksite.example/2"],
        };
        let manager = ScraperManager::with_scrapers(vec![Box::new(scraper)], config());

        let articles = manager.scrape_source(Some("mock")).await.unwrap();
        let urls: Vec<_> = articles.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(urls, vec!["https://mocksite.example/1", "https://mocksite.example/2"]);

        assert_eq!(manager.scrape_source(None).await.unwrap().len(), 2);
        assert!(manager.scrape_source(Some("other")).await.is_err());
    }

    #[tokio::test]
    async fn test_scrape_url_and_list() {
        let scraper = MockScraper {
            name: "Mocksite",
            links: vec![],
        };
        let manager = ScraperManager::with_scrapers(vec![Box::new(scraper)], config());

        let article = manager.scrape_url("https://mocksite.example/1").await.unwrap();
        assert_eq!(article.source, "Mocksite");
        assert_eq!(manager.list_scrapers(), vec![("Mocksite".to_string(), vec!["mock".to_string()])]);
    }
}
