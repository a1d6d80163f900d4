//! RSS 2.0 / Atom feed fetching and normalization into articles.

use chrono::{DateTime, Utc};
use tscope_analysis::clean::clean_article_text;
use tscope_core::{Article, Error, Fetcher, Result};

pub const UNKNOWN_SOURCE: &str = "Unknown";

pub const DEFAULT_FEEDS: &[&str] = &[
    "https://techcrunch.com/feed/",
    "https://www.theverge.com/rss/index.xml",
    "https://feeds.arstechnica.com/arstechnica/index/",
    "https://www.wired.com/feed/rss",
    "https://www.zdnet.com/news/rss.xml",
];

/// One feed entry before it becomes an [`Article`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// Raw summary HTML, or the entry content when the summary is empty
    pub summary_html: String,
    pub published: Option<DateTime<Utc>>,
    pub source: String,
}

impl FeedEntry {
    pub fn into_article(self) -> Article {
        let summary = clean_article_text(&self.summary_html);
        let mut article = Article::new(self.link, self.title.trim(), self.source);
        article.published_at = self.published;
        article.summary = Some(summary);
        article
    }
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn rss_entries(channel: &rss::Channel) -> Vec<FeedEntry> {
    let source = non_empty(Some(channel.title())).unwrap_or(UNKNOWN_SOURCE);
    channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            summary_html: non_empty(item.description())
                .or_else(|| item.content())
                .unwrap_or_default()
                .to_string(),
            published: item.pub_date().and_then(parse_date),
            source: source.to_string(),
        })
        .collect()
}

fn atom_entries(feed: &atom_syndication::Feed) -> Vec<FeedEntry> {
    let source = non_empty(Some(feed.title().as_str())).unwrap_or(UNKNOWN_SOURCE);
    feed.entries()
        .iter()
        .map(|entry| FeedEntry {
            title: entry.title().as_str().to_string(),
            link: entry
                .links()
                .first()
                .map(|link| link.href().to_string())
                .unwrap_or_default(),
            summary_html: non_empty(entry.summary().map(|s| s.as_str()))
                .or_else(|| entry.content().and_then(|c| c.value()))
                .unwrap_or_default()
                .to_string(),
            published: entry
                .published()
                .copied()
                .or_else(|| Some(*entry.updated()))
                .map(|dt| dt.with_timezone(&Utc)),
            source: source.to_string(),
        })
        .collect()
}

/// Parse a feed document, RSS 2.0 first and Atom second.
pub fn parse_feed(body: &str) -> Result<Vec<FeedEntry>> {
    if let Ok(channel) = rss::Channel::read_from(body.as_bytes()) {
        return Ok(rss_entries(&channel));
    }
    if let Ok(feed) = atom_syndication::Feed::read_from(body.as_bytes()) {
        return Ok(atom_entries(&feed));
    }
    Err(Error::Feed("Document is neither RSS nor Atom".to_string()))
}

/// Fetch one feed and normalize its entries. Transport, status and parse
/// failures are all feed errors.
pub async fn fetch_feed(fetcher: &dyn Fetcher, url: &str) -> Result<Vec<Article>> {
    let page = fetcher
        .get(url)
        .await
        .map_err(|e| Error::Feed(format!("Failed to fetch {}: {}", url, e)))?;
    if !page.is_success() {
        return Err(Error::Feed(format!("Failed to fetch {}: HTTP {}", url, page.status)));
    }

    let entries = parse_feed(&page.body).map_err(|e| Error::Feed(format!("{}: {}", url, e)))?;
    tracing::debug!("Parsed {} entries from {}", entries.len(), url);
    Ok(entries.into_iter().map(FeedEntry::into_article).collect())
}

/// Fetch every feed in order. A feed that fails to fetch or parse is logged
/// and skipped; the entries of the other feeds are kept.
pub async fn fetch_articles(fetcher: &dyn Fetcher, feeds: &[String]) -> Vec<Article> {
    let mut articles = Vec::new();
    for url in feeds {
        match fetch_feed(fetcher, url).await {
            Ok(entries) => articles.extend(entries),
            Err(e) => tracing::warn!("Skipping feed: {}", e),
        }
    }
    articles
}
