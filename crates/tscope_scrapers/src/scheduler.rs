use std::env;
use std::sync::Arc;
use std::time::Duration;
use tscope_analysis::duplicates::{DuplicateConfig, DuplicateDetector};
use tscope_core::{ArticleSink, Embedder, Fetcher, Result};
use tscope_storage::StorageMode;
use crate::feeds::{fetch_articles, DEFAULT_FEEDS};

#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    pub feeds: Vec<String>,
    /// Sleep between cycles
    pub interval: Duration,
    pub storage_mode: StorageMode,
    pub duplicates: DuplicateConfig,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            feeds: DEFAULT_FEEDS.iter().map(|f| f.to_string()).collect(),
            interval: Duration::from_secs(30 * 60),
            storage_mode: StorageMode::Json,
            duplicates: DuplicateConfig::default(),
        }
    }
}

impl SchedulerConfig {
    /// Overrides from `TECHSCOPE_FEEDS` (comma separated),
    /// `TECHSCOPE_SCHEDULE_MINUTES` and `TECHSCOPE_STORAGE_MODE`.
    pub fn from_env() -> Self {
        let mut config = Self {
            duplicates: DuplicateConfig::from_env(),
            ..Self::default()
        };
        if let Ok(feeds) = env::var("TECHSCOPE_FEEDS") {
            let feeds: Vec<String> = feeds
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
            if !feeds.is_empty() {
                config.feeds = feeds;
            }
        }
        if let Some(minutes) = env::var("TECHSCOPE_SCHEDULE_MINUTES").ok().and_then(|v| v.parse::<u64>().ok()) {
            config.interval = Duration::from_secs(minutes * 60);
        }
        if let Some(mode) = env::var("TECHSCOPE_STORAGE_MODE").ok().and_then(|v| v.parse().ok()) {
            config.storage_mode = mode;
        }
        config
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Polls the configured feeds, drops near-duplicate entries and appends the
/// rest to a sink.
pub struct Scheduler {
    fetcher: Arc<dyn Fetcher>,
    detector: DuplicateDetector,
    sink: Arc<dyn ArticleSink>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        embedder: Arc<dyn Embedder>,
        sink: Arc<dyn ArticleSink>,
        config: SchedulerConfig,
    ) -> Self {
        let detector = DuplicateDetector::new(embedder, &config.duplicates);
        Self {
            fetcher,
            detector,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// One fetch / dedup / store cycle. Returns the number of stored articles.
    /// Unreachable feeds are skipped; dedup and storage failures are errors.
    pub async fn run_once(&self) -> Result<usize> {
        tracing::info!("Fetching latest tech articles from {} feeds", self.config.feeds.len());
        let articles = fetch_articles(self.fetcher.as_ref(), &self.config.feeds).await;
        let fetched = articles.len();

        let unique = self
            .detector
            .filter(articles, |a| a.summary.clone().unwrap_or_default())
            .await?;
        tracing::debug!("Dropped {} near-duplicate entries", fetched - unique.len());

        let stored = self.sink.write_all(&unique).await?;
        tracing::info!("{} new unique articles saved to {}", stored, self.sink.name());
        Ok(stored)
    }

    /// Runs cycles forever; a dedup or storage failure ends the loop.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("Starting TechScope scheduler");
        loop {
            self.run_once().await?;
            tracing::info!("Sleeping for {:?}", self.config.interval);
            tokio::time::sleep(self.config.interval).await;
        }
    }
}
