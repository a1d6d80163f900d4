use async_trait::async_trait;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait ArticleSink: Send + Sync {
    /// Short name used in logs ("json", "csv", ...)
    fn name(&self) -> &str;

    /// Append one record. Stamps a fresh UTC `stored_at` on the written copy.
    async fn write(&self, article: &Article) -> Result<()>;

    /// Append many records, one write per article
    async fn write_all(&self, articles: &[Article]) -> Result<usize> {
        for article in articles {
            self.write(article).await?;
        }
        Ok(articles.len())
    }
}
