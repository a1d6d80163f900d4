use std::env;

pub mod clean;
pub mod duplicates;
pub mod embeddings;
pub mod keywords;
pub mod models;
pub mod pipeline;
pub mod scoring;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Which remote models join the summarizer and keyword chains.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub openai_api_key: Option<String>,
    pub use_openai: bool,
    pub llm_url: Option<String>,
    pub llm_model: String,
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            use_openai: true,
            llm_url: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            embedding_url: None,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            embedding_api_key: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl ModelConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            use_openai: non_empty_var("USE_OPENAI")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.use_openai),
            llm_url: non_empty_var("TECHSCOPE_LLM_URL"),
            llm_model: non_empty_var("TECHSCOPE_LLM_MODEL").unwrap_or(defaults.llm_model),
            embedding_url: non_empty_var("TECHSCOPE_EMBEDDING_URL"),
            embedding_model: non_empty_var("TECHSCOPE_EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            embedding_api_key: non_empty_var("TECHSCOPE_EMBEDDING_API_KEY"),
        }
    }

    /// A chat endpoint is usable with an OpenAI key or an explicit local URL.
    pub fn chat_enabled(&self) -> bool {
        self.use_openai && (self.openai_api_key.is_some() || self.llm_url.is_some())
    }

    pub fn llm_base_url(&self) -> String {
        self.llm_url.clone().unwrap_or_else(|| OPENAI_BASE_URL.to_string())
    }
}

pub mod prelude {
    pub use super::ModelConfig;
    pub use super::clean::{clean_article_text, clean_html, normalize_text};
    pub use super::duplicates::{detect_similar, filter_duplicates, DuplicateConfig, DuplicateDetector, DuplicatePair};
    pub use super::embeddings::{create_embedder, HashingEmbedder, HttpEmbedder};
    pub use super::keywords::{create_keyword_extractor, KeywordChain, KeywordExtractor};
    pub use super::models::{create_summarizer, Summarizer, SummaryChain};
    pub use super::pipeline::Analyzer;
    pub use super::scoring::{LexiconAnalyzer, PolarityAnalyzer, ScoringConfig};
    pub use tscope_core::{Article, Error, Result};
}

pub use embeddings::create_embedder;
pub use models::create_summarizer;
pub use pipeline::Analyzer;
