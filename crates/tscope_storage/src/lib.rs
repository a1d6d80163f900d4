use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde_json::{Map, Value};
use tscope_core::{Article, ArticleSink, Error, Result};

pub mod backends;

pub use backends::*;

/// Which sink receives a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageMode {
    Json,
    Csv,
    Db,
    Mongo,
    Txt,
}

impl StorageMode {
    pub const ALL: [StorageMode; 5] = [Self::Json, Self::Csv, Self::Db, Self::Mongo, Self::Txt];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Db => "db",
            Self::Mongo => "mongo",
            Self::Txt => "txt",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "db" => Ok(Self::Db),
            "mongo" => Ok(Self::Mongo),
            "txt" => Ok(Self::Txt),
            other => Err(Error::Config(format!("Unknown storage mode: {}", other))),
        }
    }
}

/// File locations and connection settings for every sink.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub json_file: String,
    pub csv_file: String,
    pub txt_file: String,
    pub db_file: String,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub mongo_collection: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            json_file: "articles.json".to_string(),
            csv_file: "articles.csv".to_string(),
            txt_file: "techscope.txt".to_string(),
            db_file: "articles.db".to_string(),
            mongo_uri: "mongodb://localhost:27017/".to_string(),
            mongo_database: "techscope".to_string(),
            mongo_collection: "articles".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = env::var("TECHSCOPE_DATA_DIR") {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(uri) = env::var("TECHSCOPE_MONGO_URI") {
            if !uri.trim().is_empty() {
                config.mongo_uri = uri;
            }
        }
        config
    }

    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(&self.json_file)
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(&self.csv_file)
    }

    pub fn txt_path(&self) -> PathBuf {
        self.data_dir.join(&self.txt_file)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }
}

/// The article as a JSON object with a `timestamp` field, as the JSON and
/// document sinks write it.
pub fn timestamped_record(article: &Article) -> Result<Map<String, Value>> {
    let timestamp = article
        .stored_at
        .unwrap_or_else(chrono::Utc::now)
        .to_rfc3339();
    let mut record = match serde_json::to_value(article)? {
        Value::Object(map) => map,
        other => {
            return Err(Error::Storage(format!("article serialized to a non-object: {}", other)));
        }
    };
    record.insert("timestamp".to_string(), Value::String(timestamp));
    Ok(record)
}

/// Copy of the article stamped with the current UTC time.
pub fn stamped(article: &Article) -> Article {
    let mut copy = article.clone();
    copy.stored_at = Some(chrono::Utc::now());
    copy
}

pub fn create_sink(mode: StorageMode, config: &StorageConfig) -> Result<Box<dyn ArticleSink>> {
    match mode {
        StorageMode::Json => Ok(Box::new(JsonLinesSink::new(config.json_path()))),
        StorageMode::Csv => Ok(Box::new(CsvSink::new(config.csv_path()))),
        StorageMode::Txt => Ok(Box::new(TextSink::new(config.txt_path()))),
        #[cfg(feature = "sqlite")]
        StorageMode::Db => Ok(Box::new(SqliteSink::new(config.db_path()))),
        #[cfg(not(feature = "sqlite"))]
        StorageMode::Db => Err(Error::Config("built without the `sqlite` feature".to_string())),
        #[cfg(feature = "mongo")]
        StorageMode::Mongo => Ok(Box::new(MongoSink::new(
            config.mongo_uri.clone(),
            config.mongo_database.clone(),
            config.mongo_collection.clone(),
        ))),
        #[cfg(not(feature = "mongo"))]
        StorageMode::Mongo => Err(Error::Config("built without the `mongo` feature".to_string())),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_sink, StorageConfig, StorageMode};
    pub use tscope_core::ArticleSink;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_mode_parsing() {
        for mode in StorageMode::ALL {
            assert_eq!(mode.as_str().parse::<StorageMode>().unwrap(), mode);
        }
        assert_eq!(" JSON ".parse::<StorageMode>().unwrap(), StorageMode::Json);

        let err = "parquet".parse::<StorageMode>().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Unknown storage mode: parquet");
    }

    #[test]
    fn test_paths_follow_data_dir() {
        let config = StorageConfig::default().with_data_dir("/tmp/techscope");
        assert_eq!(config.json_path(), PathBuf::from("/tmp/techscope/articles.json"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/techscope/articles.db"));
        assert_eq!(config.txt_path(), PathBuf::from("/tmp/techscope/techscope.txt"));
    }

    #[test]
    fn test_timestamped_record() {
        let article = stamped(&Article::new("https://example.com/a", "A", "Example"));
        let record = timestamped_record(&article).unwrap();
        assert_eq!(record["url"], "https://example.com/a");
        assert!(record["timestamp"].as_str().unwrap().starts_with(&article.stored_at.unwrap().format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn test_stamped_leaves_original_untouched() {
        let article = Article::new("https://example.com/a", "A", "Example");
        let copy = stamped(&article);
        assert!(article.stored_at.is_none());
        assert!(copy.stored_at.is_some());
    }

    #[tokio::test]
    async fn test_create_sink_names() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig::default().with_data_dir(dir.path());
        assert_eq!(create_sink(StorageMode::Json, &config).unwrap().name(), "json");
        assert_eq!(create_sink(StorageMode::Csv, &config).unwrap().name(), "csv");
        assert_eq!(create_sink(StorageMode::Txt, &config).unwrap().name(), "txt");
        #[cfg(feature = "sqlite")]
        assert_eq!(create_sink(StorageMode::Db, &config).unwrap().name(), "db");
        #[cfg(not(feature = "mongo"))]
        assert!(create_sink(StorageMode::Mongo, &config).is_err());
    }
}
