use async_trait::async_trait;
use mongodb::bson::{self, Document};
use mongodb::Client;
use tscope_core::{Article, ArticleSink, Error, Result};
use crate::{stamped, timestamped_record};

/// One document per article in `database.collection`; connects per write.
#[derive(Debug, Clone)]
pub struct MongoSink {
    uri: String,
    database: String,
    collection: String,
}

impl MongoSink {
    pub fn new(uri: impl Into<String>, database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: collection.into(),
        }
    }
}

pub fn to_document(article: &Article) -> Result<Document> {
    let record = timestamped_record(article)?;
    bson::to_document(&record).map_err(|e| Error::Storage(format!("Failed to encode document: {}", e)))
}

#[async_trait]
impl ArticleSink for MongoSink {
    fn name(&self) -> &str {
        "mongo"
    }

    async fn write(&self, article: &Article) -> Result<()> {
        let document = to_document(&stamped(article))?;
        let client = Client::with_uri_str(&self.uri)
            .await
            .map_err(|e| Error::Storage(format!("MongoDB connection failed: {}", e)))?;
        client
            .database(&self.database)
            .collection::<Document>(&self.collection)
            .insert_one(document, None)
            .await
            .map_err(|e| Error::Storage(format!("MongoDB write failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_carries_timestamp() {
        let article = stamped(&Article::new("https://example.com/a", "A", "Example"));
        let document = to_document(&article).unwrap();
        assert_eq!(document.get_str("url").unwrap(), "https://example.com/a");
        assert!(document.get_str("timestamp").is_ok());
    }
}
