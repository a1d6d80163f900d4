use async_trait::async_trait;
use crate::Result;

/// A fetched HTTP resource. Non-2xx responses are still returned as pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body of a successful response, or a scraping error carrying the status
    pub fn into_body(self) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(crate::Error::Scraping(format!("HTTP {} for {}", self.status, self.url)))
        }
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Transport failures are errors; HTTP error statuses are not.
    async fn get(&self, url: &str) -> Result<Page>;
}
