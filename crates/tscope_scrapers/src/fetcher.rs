use std::env;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tscope_core::{Fetcher, Page, Result};

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; TechScopeBot/1.0; +https://github.com/Brahamanbtp/TechScope-AI)";

#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub user_agent: String,
    /// Articles fetched per site
    pub limit: usize,
    /// Pause between article fetches
    pub delay: Duration,
    pub timeout: Duration,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: USER_AGENT.to_string(),
            limit: 5,
            delay: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(limit) = env::var("TECHSCOPE_SCRAPE_LIMIT").ok().and_then(|v| v.parse().ok()) {
            config.limit = limit;
        }
        if let Some(secs) = env::var("TECHSCOPE_SCRAPE_DELAY_SECS").ok().and_then(|v| v.parse().ok()) {
            config.delay = Duration::from_secs(secs);
        }
        config
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// reqwest-backed fetcher carrying the bot user agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<Page> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let body = response.text().await?;
        Ok(Page { url, status, body })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use super::*;
    use tscope_core::Error;

    /// Serves canned pages; unknown URLs are transport errors.
    #[derive(Debug, Default)]
    pub struct MockFetcher {
        pages: HashMap<String, (u16, String)>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_page(mut self, url: &str, status: u16, body: &str) -> Self {
            self.pages.insert(url.to_string(), (status, body.to_string()));
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn get(&self, url: &str) -> Result<Page> {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some((status, body)) => Ok(Page {
                    url: url.to_string(),
                    status: *status,
                    body: body.clone(),
                }),
                None => Err(Error::Scraping(format!("connection refused: {}", url))),
            }
        }
    }
}
