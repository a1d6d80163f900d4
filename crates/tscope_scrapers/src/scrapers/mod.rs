use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use scraper::{ElementRef, Html, Selector};
use tscope_analysis::clean::normalize_text;
use tscope_core::{Article, Error, Fetcher, Result};
use url::Url;
use crate::fetcher::ScraperConfig;
use crate::logging::Logger;
use crate::robots::{robots_path, RobotsTxt};

pub mod arstechnica;
pub mod techcrunch;
pub mod theverge;
pub mod wired;

pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// How candidate article links are pulled out of a homepage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRule {
    pub selector: &'static str,
    /// Keep only raw hrefs starting with this
    pub href_prefix: Option<&'static str>,
    /// Resolve relative hrefs against the site's base URL
    pub join_base: bool,
    /// Keep only URLs containing this (date-stamped article paths)
    pub contains: Option<&'static str>,
    pub strip_query: bool,
}

/// Markup knowledge for one news site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteProfile {
    pub name: &'static str,
    pub cli_name: &'static str,
    pub base_url: &'static str,
    pub links: LinkRule,
    pub title_fallback: &'static str,
    pub author_selector: &'static str,
    /// First match holds the article body; its `<p>`s are the content
    pub body_selector: &'static str,
}

impl SiteProfile {
    pub fn host(&self) -> Option<String> {
        Url::parse(self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
    }
}

pub const SITES: [SiteProfile; 4] = [techcrunch::PROFILE, theverge::PROFILE, wired::PROFILE, arstechnica::PROFILE];

#[async_trait]
pub trait Scraper: Send + Sync {
    /// Name of the news source
    fn source(&self) -> &str;

    /// True if this scraper knows the markup of `url`
    fn can_handle(&self, url: &str) -> bool;

    /// Shorthand used on the command line
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }

    /// Candidate article URLs from the homepage, de-duplicated and sorted.
    /// Empty when robots.txt forbids the homepage or it cannot be fetched.
    async fn get_article_links(&self) -> Vec<String>;

    async fn scrape_article(&self, url: &str) -> Result<Article>;

    /// Up to `limit` articles, one at a time with a fixed pause between
    /// requests. Failed articles are logged and skipped.
    async fn scrape(&self, limit: usize, delay: std::time::Duration) -> Vec<Article> {
        let links: Vec<String> = self.get_article_links().await.into_iter().take(limit).collect();
        let mut articles = Vec::new();
        for (i, link) in links.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(delay).await;
            }
            tracing::info!("[{}] [{}/{}] Scraping: {}", self.source(), i + 1, links.len(), link);
            match self.scrape_article(link).await {
                Ok(article) => articles.push(article),
                Err(e) => tracing::warn!("[{}] Skipping {}: {}", self.source(), link, e),
            }
        }
        tracing::info!("[{}] Done. {} articles fetched.", self.source(), articles.len());
        articles
    }
}

/// A scraper driven entirely by a [`SiteProfile`].
pub struct SiteScraper {
    profile: SiteProfile,
    fetcher: Arc<dyn Fetcher>,
    config: ScraperConfig,
    logger: Logger,
}

impl fmt::Debug for SiteScraper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteScraper")
            .field("profile", &self.profile.name)
            .field("fetcher", &"<dyn Fetcher>")
            .field("config", &self.config)
            .finish()
    }
}

impl SiteScraper {
    pub fn new(profile: SiteProfile, fetcher: Arc<dyn Fetcher>, config: ScraperConfig) -> Self {
        let logger = Logger::new().with_prefix(format!("[{}]", profile.name));
        Self {
            profile,
            fetcher,
            config,
            logger,
        }
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub async fn is_allowed(&self, path: &str) -> bool {
        RobotsTxt::fetch(self.fetcher.as_ref(), self.profile.base_url)
            .await
            .is_allowed(&self.config.user_agent, path)
    }

    fn extract_links(&self, document: &Html) -> Result<Vec<String>> {
        let rule = &self.profile.links;
        let selector = utils::selector(rule.selector)?;
        let base = Url::parse(self.profile.base_url)?;

        let mut links = BTreeSet::new();
        for href in document.select(&selector).filter_map(|a| a.value().attr("href")) {
            if let Some(prefix) = rule.href_prefix {
                if !href.starts_with(prefix) {
                    continue;
                }
            }
            let mut link = if rule.join_base {
                match base.join(href) {
                    Ok(url) => url.to_string(),
                    Err(_) => continue,
                }
            } else {
                href.to_string()
            };
            if rule.strip_query {
                if let Some((before, _)) = link.split_once('?') {
                    link = before.to_string();
                }
            }
            if let Some(needle) = rule.contains {
                if !link.contains(needle) {
                    continue;
                }
            }
            links.insert(link);
        }
        Ok(links.into_iter().collect())
    }

    pub fn parse_article(&self, url: &str, html: &str) -> Result<Article> {
        let document = Html::parse_document(html);

        let title = utils::first_text(&document, "h1")?
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.profile.title_fallback.to_string());
        let author = utils::first_text(&document, self.profile.author_selector)?
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        let published_at = utils::published_at(&document)?;

        let body_selector = utils::selector(self.profile.body_selector)?;
        let content = match document.select(&body_selector).next() {
            Some(body) => utils::paragraphs(body)?.join("\n"),
            None => String::new(),
        };

        let mut article = Article::new(url, title, self.profile.name).with_content(content);
        article.author = Some(author);
        article.published_at = published_at;
        Ok(article)
    }
}

#[async_trait]
impl Scraper for SiteScraper {
    fn source(&self) -> &str {
        self.profile.name
    }

    fn can_handle(&self, url: &str) -> bool {
        match (Url::parse(url), self.profile.host()) {
            (Ok(parsed), Some(host)) => parsed
                .host_str()
                .map(|h| h.trim_start_matches("www.") == host)
                .unwrap_or(false),
            _ => false,
        }
    }

    fn cli_names(&self) -> Vec<&str> {
        vec![self.profile.cli_name]
    }

    async fn get_article_links(&self) -> Vec<String> {
        if !self.is_allowed("/").await {
            self.logger.warn("Scraping disallowed by robots.txt");
            return Vec::new();
        }

        let html = match self.fetcher.get(self.profile.base_url).await.and_then(|page| page.into_body()) {
            Ok(html) => html,
            Err(e) => {
                self.logger.error(&format!("Failed to fetch homepage: {}", e));
                return Vec::new();
            }
        };

        match self.extract_links(&Html::parse_document(&html)) {
            Ok(links) => {
                self.logger.debug(&format!("Found {} candidate links", links.len()));
                links
            }
            Err(e) => {
                self.logger.error(&format!("Failed to extract links: {}", e));
                Vec::new()
            }
        }
    }

    async fn scrape_article(&self, url: &str) -> Result<Article> {
        if !self.is_allowed(&robots_path(url)).await {
            return Err(Error::Disallowed(url.to_string()));
        }
        let html = self.fetcher.get(url).await?.into_body()?;
        self.parse_article(url, &html)
    }
}

/// Every `<p>` on an arbitrary page, joined and normalized. Empty when the
/// page has no paragraphs.
pub async fn scrape_website(fetcher: &dyn Fetcher, url: &str) -> Result<String> {
    Url::parse(url)?;
    let html = fetcher.get(url).await?.into_body()?;
    let document = Html::parse_document(&html);
    let paragraphs = utils::paragraphs(document.root_element())?;
    Ok(normalize_text(&paragraphs.join(" ")))
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    pub fn selector(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| Error::Scraping(format!("Invalid selector {}: {:?}", css, e)))
    }

    pub fn element_text(element: ElementRef<'_>) -> String {
        element.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn first_text(document: &Html, css: &str) -> Result<Option<String>> {
        let selector = selector(css)?;
        Ok(document.select(&selector).next().map(element_text))
    }

    pub fn paragraphs(root: ElementRef<'_>) -> Result<Vec<String>> {
        let selector = selector("p")?;
        Ok(root
            .select(&selector)
            .map(element_text)
            .filter(|p| !p.is_empty())
            .collect())
    }

    /// `datetime` of the first `<time>` element, when it parses.
    pub fn published_at(document: &Html) -> Result<Option<DateTime<Utc>>> {
        let selector = selector("time")?;
        Ok(document
            .select(&selector)
            .next()
            .and_then(|t| t.value().attr("datetime"))
            .and_then(parse_datetime))
    }

    /// RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
    pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
            return Some(date.with_timezone(&Utc));
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date.and_hms_opt(0, 0, 0).map(|d| d.and_utc()),
            Err(e) => {
                tracing::debug!("Unparseable datetime {:?}: {}", raw, e);
                None
            }
        }
    }
}
