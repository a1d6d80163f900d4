use std::path::{Path, PathBuf};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{Connection, Row};
use tscope_core::{Article, ArticleSink, Error, Result};
use crate::stamped;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS summaries (
        id TEXT PRIMARY KEY,
        summary TEXT,
        credibility REAL,
        keywords TEXT,
        created_at TEXT NOT NULL
    )
    "#,
];

/// A row of the `summaries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSummary {
    pub id: String,
    pub summary: Option<String>,
    pub credibility: Option<f64>,
    pub keywords: Vec<String>,
    pub created_at: String,
}

fn storage_error(context: &str, e: sqlx::Error) -> Error {
    Error::Storage(format!("{}: {}", context, e))
}

async fn connect(db_path: &Path) -> Result<SqliteConnection> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let mut conn = SqliteConnection::connect_with(&options)
        .await
        .map_err(|e| storage_error("Failed to open database", e))?;

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        sqlx::query(migration)
            .execute(&mut conn)
            .await
            .map_err(|e| storage_error(&format!("Failed to run migration {}", i), e))?;
    }
    Ok(conn)
}

/// Summary, credibility and keywords per article. A connection is opened
/// and closed for every write.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    db_path: PathBuf,
}

impl SqliteSink {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self { db_path: db_path.into() }
    }

    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }
}

#[async_trait]
impl ArticleSink for SqliteSink {
    fn name(&self) -> &str {
        "db"
    }

    async fn write(&self, article: &Article) -> Result<()> {
        let article = stamped(article);
        let created_at = article.stored_at.unwrap_or_else(chrono::Utc::now).to_rfc3339();
        let keywords = article.keywords.as_ref().map(|k| k.join(",")).unwrap_or_default();

        let mut conn = connect(&self.db_path).await?;
        sqlx::query("INSERT INTO summaries (id, summary, credibility, keywords, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(article.summary.as_deref())
            .bind(article.credibility)
            .bind(keywords)
            .bind(created_at)
            .execute(&mut conn)
            .await
            .map_err(|e| storage_error("Failed to store summary", e))?;
        conn.close()
            .await
            .map_err(|e| storage_error("Failed to close database", e))?;
        Ok(())
    }
}

/// Rows of the `summaries` table, newest first. A missing database yields no rows.
pub async fn load_records(db_path: &Path) -> Result<Vec<StoredSummary>> {
    if !db_path.exists() {
        return Ok(Vec::new());
    }

    let mut conn = connect(db_path).await?;
    let rows = sqlx::query("SELECT id, summary, credibility, keywords, created_at FROM summaries ORDER BY created_at DESC")
        .fetch_all(&mut conn)
        .await
        .map_err(|e| storage_error("Failed to load summaries", e))?;
    conn.close()
        .await
        .map_err(|e| storage_error("Failed to close database", e))?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let keywords: Option<String> = row.get("keywords");
            StoredSummary {
                id: row.get("id"),
                summary: row.get("summary"),
                credibility: row.get("credibility"),
                keywords: keywords
                    .unwrap_or_default()
                    .split(',')
                    .filter(|k| !k.is_empty())
                    .map(str::to_string)
                    .collect(),
                created_at: row.get("created_at"),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_database_is_empty() {
        let dir = tempdir().unwrap();
        let records = load_records(&dir.path().join("missing.db")).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_write_and_load_newest_first() {
        let dir = tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("articles.db"));

        let mut first = Article::new("https://example.com/1", "First", "Example");
        first.summary = Some("First summary".to_string());
        first.credibility = Some(0.7);
        first.keywords = Some(vec!["chips".to_string(), "supply chain".to_string()]);
        sink.write(&first).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let mut second = Article::new("https://example.com/2", "Second", "Example");
        second.summary = Some("Second summary".to_string());
        sink.write(&second).await.unwrap();

        let records = load_records(sink.db_path()).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].summary.as_deref(), Some("Second summary"));
        assert!(records[0].keywords.is_empty());
        assert_eq!(records[0].credibility, None);
        assert_eq!(records[1].keywords, vec!["chips", "supply chain"]);
        assert_eq!(records[1].credibility, Some(0.7));
        assert_ne!(records[0].id, records[1].id);
    }
}
