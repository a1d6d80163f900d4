use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use async_trait::async_trait;
use tscope_core::{Article, ArticleSink, Result};
use crate::stamped;

/// Human-readable report, one block per article.
#[derive(Debug, Clone)]
pub struct TextSink {
    path: PathBuf,
}

impl TextSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

pub fn format_block(article: &Article) -> String {
    let mut block = String::new();
    let _ = writeln!(block, "=== {} ===", article.title);
    let _ = writeln!(block, "URL: {}", article.url);
    let _ = writeln!(block, "Source: {}", article.source);
    let _ = writeln!(block, "Author: {}", article.author.as_deref().unwrap_or("Unknown"));
    if let Some(published) = article.published_at {
        let _ = writeln!(block, "Published: {}", published.to_rfc3339());
    }
    if let Some(credibility) = article.credibility {
        let _ = writeln!(block, "Credibility: {:.2}", credibility);
    }
    if let Some(bias) = &article.bias {
        let _ = writeln!(block, "Bias: {} ({:.2})", bias.bias_label, bias.bias_score);
    }
    if let Some(sentiment) = &article.sentiment {
        let _ = writeln!(block, "Sentiment: {} ({:.2})", sentiment.sentiment_label, sentiment.sentiment_score);
    }
    if let Some(keywords) = article.keywords.as_ref().filter(|k| !k.is_empty()) {
        let _ = writeln!(block, "Keywords: {}", keywords.join(", "));
    }
    if let Some(summary) = &article.summary {
        let _ = writeln!(block, "Summary:\n{}", summary);
    }
    if let Some(stored_at) = article.stored_at {
        let _ = writeln!(block, "Stored: {}", stored_at.to_rfc3339());
    }
    block.push('\n');
    block
}

#[async_trait]
impl ArticleSink for TextSink {
    fn name(&self) -> &str {
        "txt"
    }

    async fn write(&self, article: &Article) -> Result<()> {
        let block = format_block(&stamped(article));
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(block.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_block() {
        let mut article = Article::new("https://example.com/a", "Chip news", "Example");
        article.credibility = Some(0.5);
        article.keywords = Some(vec!["chip".to_string(), "fab".to_string()]);
        let block = format_block(&article);
        assert!(block.starts_with("=== Chip news ===\nURL: https://example.com/a\n"));
        assert!(block.contains("Author: Unknown\n"));
        assert!(block.contains("Credibility: 0.50\n"));
        assert!(block.contains("Keywords: chip, fab\n"));
        assert!(!block.contains("Summary:"));
    }

    #[tokio::test]
    async fn test_appends_blocks() {
        let dir = tempdir().unwrap();
        let sink = TextSink::new(dir.path().join("techscope.txt"));
        let article = Article::new("https://example.com/a", "Chip news", "Example");
        sink.write(&article).await.unwrap();
        sink.write(&article).await.unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        assert_eq!(contents.matches("=== Chip news ===").count(), 2);
        assert_eq!(contents.matches("Stored: ").count(), 2);
    }
}
