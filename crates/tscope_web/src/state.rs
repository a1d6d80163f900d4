use std::fmt;
use std::sync::Arc;
use tscope_analysis::Analyzer;
use tscope_core::Fetcher;
use tscope_storage::StorageConfig;

/// Shared by every handler; cloned per request behind an `Arc`.
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub fetcher: Arc<dyn Fetcher>,
    pub storage: StorageConfig,
    /// When set, POST routes require a matching `x-api-key` header
    pub api_key: Option<String>,
}

impl AppState {
    pub fn new(analyzer: Arc<Analyzer>, fetcher: Arc<dyn Fetcher>, storage: StorageConfig) -> Self {
        Self {
            analyzer,
            fetcher,
            storage,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("analyzer", &self.analyzer)
            .field("storage", &self.storage)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
