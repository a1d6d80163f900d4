pub mod feeds;
pub mod fetcher;
pub mod logging;
pub mod manager;
pub mod robots;
pub mod scheduler;
pub mod scrapers;

pub use fetcher::{HttpFetcher, ScraperConfig, USER_AGENT};
pub use logging::{init_logging, Logger};
pub use manager::ScraperManager;
pub use scheduler::{Scheduler, SchedulerConfig};
pub use scrapers::{scrape_website, Scraper, SiteScraper};

pub mod prelude {
    pub use super::feeds::{fetch_articles, fetch_feed, DEFAULT_FEEDS};
    pub use super::scrapers::{all_scrapers, scrape_website, Scraper, SiteScraper, SITES};
    pub use super::{HttpFetcher, ScraperConfig, ScraperManager, Scheduler, SchedulerConfig};
    pub use tscope_core::{Article, Error, Result};
}
