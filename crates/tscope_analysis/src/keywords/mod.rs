//! Keyword extraction. Strategies run in order over cleaned text; the first
//! one producing keywords wins and its output is post-processed (stopwords
//! removed, short phrases dropped, longest first, at most ten).

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tscope_core::{Embedder, Result};

pub mod embedding;
pub mod frequency;
pub mod rake;
pub mod stopwords;

pub use embedding::EmbeddingRankExtractor;
pub use frequency::FrequencyExtractor;
pub use rake::RakeExtractor;
pub use stopwords::is_stopword;

pub const MIN_KEYWORD_TEXT_CHARS: usize = 100;
pub const MAX_KEYWORDS: usize = 10;

lazy_static! {
    static ref URL: Regex = Regex::new(r"http\S+|www.\S+").unwrap();
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-zA-Z0-9\s]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[async_trait]
pub trait KeywordExtractor: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    /// Ranked candidate keywords, best first, from already cleaned text.
    async fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>>;
}

pub fn clean_for_keywords(text: &str) -> String {
    let text = URL.replace_all(text, "");
    let text = NON_ALNUM.replace_all(&text, "");
    WHITESPACE.replace_all(&text, " ").trim().to_lowercase()
}

pub fn post_process_keywords(keywords: &[String]) -> Vec<String> {
    let cleaned: BTreeSet<String> = keywords
        .iter()
        .filter(|kw| kw.chars().count() >= 3)
        .filter_map(|kw| {
            let terms: Vec<&str> = kw.split_whitespace().filter(|w| !is_stopword(w)).collect();
            (!terms.is_empty()).then(|| terms.join(" "))
        })
        .collect();

    let mut cleaned: Vec<String> = cleaned.into_iter().collect();
    cleaned.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
    cleaned.truncate(MAX_KEYWORDS);
    cleaned
}

#[derive(Debug)]
pub struct KeywordChain {
    strategies: Vec<Arc<dyn KeywordExtractor>>,
    top_n: usize,
}

impl KeywordChain {
    pub fn new(strategies: Vec<Arc<dyn KeywordExtractor>>) -> Self {
        Self {
            strategies,
            top_n: MAX_KEYWORDS,
        }
    }

    pub fn strategies(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }

    /// Empty for text under the minimum length or when every strategy comes up empty.
    pub async fn extract(&self, text: &str) -> Vec<String> {
        if text.chars().count() < MIN_KEYWORD_TEXT_CHARS {
            return Vec::new();
        }

        let cleaned = clean_for_keywords(text);
        for strategy in &self.strategies {
            match strategy.extract(&cleaned, self.top_n).await {
                Ok(keywords) if !keywords.is_empty() => return post_process_keywords(&keywords),
                Ok(_) => tracing::debug!("{} found no keywords", strategy.name()),
                Err(e) => tracing::warn!("{} keyword extraction failed: {}", strategy.name(), e),
            }
        }
        Vec::new()
    }
}

/// Embedding rank only with a real sentence-embedding model behind it.
pub fn create_keyword_extractor(embedder: Option<Arc<dyn Embedder>>) -> KeywordChain {
    let mut strategies: Vec<Arc<dyn KeywordExtractor>> = Vec::new();
    if let Some(embedder) = embedder {
        strategies.push(Arc::new(EmbeddingRankExtractor::new(embedder)));
    }
    strategies.push(Arc::new(RakeExtractor));
    strategies.push(Arc::new(FrequencyExtractor));
    KeywordChain::new(strategies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscope_core::Error;

    #[derive(Debug)]
    struct FailingExtractor;

    #[async_trait]
    impl KeywordExtractor for FailingExtractor {
        fn name(&self) -> &str {
            "failing"
        }

        async fn extract(&self, _text: &str, _top_n: usize) -> Result<Vec<String>> {
            Err(Error::Inference("model unavailable".to_string()))
        }
    }

    const ARTICLE: &str = "Quantum computing startups raised record funding this year. \
        Investors say quantum computing hardware is maturing quickly, and quantum \
        computing software tools are following close behind.";

    #[test]
    fn test_clean_for_keywords() {
        assert_eq!(
            clean_for_keywords("  Visit https://example.com NOW!!  The   C++ report, www.x.org "),
            "visit now the c report"
        );
    }

    #[test]
    fn test_post_process() {
        let raw: Vec<String> = ["of", "the cloud", "ai", "cloud", "edge computing", "and the", "gpu"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(post_process_keywords(&raw), vec!["edge computing", "cloud", "gpu"]);
    }

    #[test]
    fn test_post_process_caps_at_ten() {
        let raw: Vec<String> = (0..20).map(|i| format!("keyword{:02}", i)).collect();
        let processed = post_process_keywords(&raw);
        assert_eq!(processed.len(), MAX_KEYWORDS);
        assert_eq!(processed[0], "keyword00");
    }

    #[tokio::test]
    async fn test_short_text_has_no_keywords() {
        let chain = create_keyword_extractor(None);
        assert!(chain.extract("Short text about chips.").await.is_empty());
    }

    #[tokio::test]
    async fn test_chain_falls_back_past_failures() {
        let strategies: Vec<Arc<dyn KeywordExtractor>> = vec![Arc::new(FailingExtractor), Arc::new(RakeExtractor)];
        let keywords = KeywordChain::new(strategies).extract(ARTICLE).await;
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= MAX_KEYWORDS);
        assert!(keywords.iter().any(|k| k.contains("quantum computing")));
    }

    #[test]
    fn test_create_keyword_extractor() {
        let chain = create_keyword_extractor(None);
        assert_eq!(chain.strategies().collect::<Vec<_>>(), vec!["rake", "frequency"]);
    }
}
