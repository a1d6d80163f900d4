use std::sync::Arc;
use async_trait::async_trait;
use tscope_core::{cosine_similarity, Embedder, Error, Result};
use super::{is_stopword, KeywordExtractor};

const MAX_CANDIDATES: usize = 100;

/// Ranks candidate words by embedding similarity to the whole document.
#[derive(Debug)]
pub struct EmbeddingRankExtractor {
    embedder: Arc<dyn Embedder>,
}

impl EmbeddingRankExtractor {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }
}

fn candidates(text: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        if word.len() < 3 || is_stopword(word) || seen.iter().any(|w| w == word) {
            continue;
        }
        seen.push(word.to_string());
        if seen.len() == MAX_CANDIDATES {
            break;
        }
    }
    seen
}

#[async_trait]
impl KeywordExtractor for EmbeddingRankExtractor {
    fn name(&self) -> &str {
        "embedding-rank"
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        let candidates = candidates(text);
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut inputs = Vec::with_capacity(candidates.len() + 1);
        inputs.push(text.to_string());
        inputs.extend(candidates.iter().cloned());

        let embeddings = self.embedder.embed(&inputs).await?;
        let (document, words) = embeddings
            .split_first()
            .ok_or_else(|| Error::Inference(format!("{} returned no embeddings", self.embedder.name())))?;

        let mut scored: Vec<(String, f64)> = candidates
            .into_iter()
            .zip(words)
            .map(|(word, embedding)| {
                let score = cosine_similarity(document, embedding);
                (word, score)
            })
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        Ok(scored.into_iter().take(top_n).map(|(word, _)| word).collect())
    }
}
