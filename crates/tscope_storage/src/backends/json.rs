use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use async_trait::async_trait;
use tscope_core::{Article, ArticleSink, Result};
use crate::{stamped, timestamped_record};

/// One JSON object per line, appended.
#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ArticleSink for JsonLinesSink {
    fn name(&self) -> &str {
        "json"
    }

    async fn write(&self, article: &Article) -> Result<()> {
        let record = timestamped_record(&stamped(article))?;
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        tracing::debug!("Appended {} to {}", article.url, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_appends_one_line_per_write() {
        let dir = tempdir().unwrap();
        let sink = JsonLinesSink::new(dir.path().join("articles.json"));
        let article = Article::new("https://example.com/a", "A", "Example");

        sink.write(&article).await.unwrap();
        sink.write(&article).await.unwrap();

        let contents = std::fs::read_to_string(sink.path()).unwrap();
        let lines: Vec<Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l["url"] == "https://example.com/a"));
        assert!(lines.iter().all(|l| l["timestamp"].is_string()));
        assert!(article.stored_at.is_none());
    }

    #[tokio::test]
    async fn test_each_write_gets_a_fresh_timestamp() {
        let dir = tempdir().unwrap();
        let sink = JsonLinesSink::new(dir.path().join("articles.json"));
        let mut article = Article::new("https://example.com/a", "A", "Example");
        article.stored_at = Some(chrono::DateTime::from_timestamp(0, 0).unwrap());

        sink.write(&article).await.unwrap();
        let contents = std::fs::read_to_string(sink.path()).unwrap();
        let record: Value = serde_json::from_str(contents.trim()).unwrap();
        assert!(!record["timestamp"].as_str().unwrap().starts_with("1970"));
    }
}
