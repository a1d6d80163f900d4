use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tscope_core::{Article, ArticleSink, Result};
use crate::stamped;

/// Keeps written articles in memory. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    articles: Arc<RwLock<Vec<Article>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn articles(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    pub async fn get_by_source(&self, source: &str) -> Vec<Article> {
        self.articles
            .read()
            .await
            .iter()
            .filter(|article| article.source == source)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ArticleSink for MemorySink {
    fn name(&self) -> &str {
        "memory"
    }

    async fn write(&self, article: &Article) -> Result<()> {
        self.articles.write().await.push(stamped(article));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_sink() {
        let sink = MemorySink::new();
        let shared = sink.clone();
        let articles = vec![
            Article::new("https://a.example/1", "One", "A"),
            Article::new("https://b.example/1", "Two", "B"),
            Article::new("https://a.example/1", "One", "A"),
        ];

        assert_eq!(sink.write_all(&articles).await.unwrap(), 3);
        assert_eq!(shared.len().await, 3);
        assert_eq!(shared.get_by_source("A").await.len(), 2);
        assert!(shared.articles().await.iter().all(|a| a.stored_at.is_some()));
    }
}
