use std::fs::OpenOptions;
use std::path::PathBuf;
use async_trait::async_trait;
use serde::Serialize;
use tscope_core::{Article, ArticleSink, Error, Result};
use crate::stamped;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    url: &'a str,
    title: &'a str,
    author: &'a str,
    source: &'a str,
    published_at: String,
    summary: &'a str,
    keywords: String,
    credibility: Option<f64>,
    bias_score: Option<f64>,
    bias_label: String,
    sentiment_score: Option<f64>,
    sentiment_label: String,
    timestamp: String,
}

impl<'a> CsvRow<'a> {
    fn from_article(article: &'a Article) -> Self {
        Self {
            url: &article.url,
            title: &article.title,
            author: article.author.as_deref().unwrap_or_default(),
            source: &article.source,
            published_at: article.published_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
            summary: article.summary.as_deref().unwrap_or_default(),
            keywords: article.keywords.as_ref().map(|k| k.join(",")).unwrap_or_default(),
            credibility: article.credibility,
            bias_score: article.bias.as_ref().map(|b| b.bias_score),
            bias_label: article.bias.as_ref().map(|b| b.bias_label.to_string()).unwrap_or_default(),
            sentiment_score: article.sentiment.as_ref().map(|s| s.sentiment_score),
            sentiment_label: article
                .sentiment
                .as_ref()
                .map(|s| s.sentiment_label.to_string())
                .unwrap_or_default(),
            timestamp: article.stored_at.map(|d| d.to_rfc3339()).unwrap_or_default(),
        }
    }
}

/// Appends rows; the header goes in only when the file is new or empty.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ArticleSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    async fn write(&self, article: &Article) -> Result<()> {
        let article = stamped(article);
        let needs_header = std::fs::metadata(&self.path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer
            .serialize(CsvRow::from_article(&article))
            .map_err(|e| Error::Storage(format!("Error writing to CSV: {}", e)))?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tscope_core::{BiasReport, SentimentReport};

    #[tokio::test]
    async fn test_header_written_once() {
        let dir = tempdir().unwrap();
        let sink = CsvSink::new(dir.path().join("articles.csv"));
        let mut article = Article::new("https://example.com/a", "Chips, again", "Example");
        article.keywords = Some(vec!["chips".to_string(), "fabs".to_string()]);
        article.credibility = Some(0.85);
        article.bias = Some(BiasReport::not_enough_text());
        article.sentiment = Some(SentimentReport::not_enough_text());

        sink.write(&article).await.unwrap();
        sink.write(&article).await.unwrap();

        let mut reader = csv::Reader::from_path(sink.path()).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "url");
        assert_eq!(&headers[headers.len() - 1], "timestamp");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Chips, again");
        assert_eq!(&rows[0][6], "chips,fabs");
        assert_eq!(&rows[0][7], "0.85");
        assert_eq!(&rows[0][9], "Not enough text");
        assert!(!rows[1][12].is_empty());

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(contents.matches("sentiment_label").count(), 1);
    }

    #[tokio::test]
    async fn test_header_added_to_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("articles.csv");
        std::fs::write(&path, "").unwrap();

        CsvSink::new(&path)
            .write(&Article::new("https://example.com/b", "B", "Example"))
            .await
            .unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("url,title,"));
    }
}
