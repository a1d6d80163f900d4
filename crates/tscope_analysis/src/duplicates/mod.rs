use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tscope_core::{cosine_similarity, round_to, Embedder, Error, Result};

pub const DEFAULT_THRESHOLD: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    pub first: usize,
    pub second: usize,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateConfig {
    pub threshold: f64,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DuplicateConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(threshold) = std::env::var("TECHSCOPE_DUPLICATE_THRESHOLD")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.threshold = threshold;
        }
        config
    }
}

/// Every pair in the upper triangle of the similarity matrix at or above
/// `threshold`, ordered by (first, second).
pub async fn detect_similar(embedder: &dyn Embedder, texts: &[String], threshold: f64) -> Result<Vec<DuplicatePair>> {
    if texts.len() < 2 {
        return Ok(Vec::new());
    }

    let embeddings = embedder.embed(texts).await?;
    if embeddings.len() != texts.len() {
        return Err(Error::Inference(format!(
            "{} returned {} embeddings for {} texts",
            embedder.name(),
            embeddings.len(),
            texts.len()
        )));
    }

    let mut pairs = Vec::new();
    for i in 0..embeddings.len() {
        for j in (i + 1)..embeddings.len() {
            let similarity = round_to(cosine_similarity(&embeddings[i], &embeddings[j]), 4);
            if similarity >= threshold {
                pairs.push(DuplicatePair {
                    first: i,
                    second: j,
                    similarity,
                });
            }
        }
    }
    Ok(pairs)
}

/// Drops the later item of every flagged pair; survivors keep their order.
pub async fn filter_duplicates<T, F>(embedder: &dyn Embedder, items: Vec<T>, text_of: F, threshold: f64) -> Result<Vec<T>>
where
    F: Fn(&T) -> String,
{
    if items.len() < 2 {
        return Ok(items);
    }

    let texts: Vec<String> = items.iter().map(&text_of).collect();
    let dropped: BTreeSet<usize> = detect_similar(embedder, &texts, threshold)
        .await?
        .into_iter()
        .map(|pair| pair.second)
        .collect();

    if !dropped.is_empty() {
        tracing::info!("🧹 Dropping {} near-duplicate item(s)", dropped.len());
    }

    Ok(items
        .into_iter()
        .enumerate()
        .filter(|(index, _)| !dropped.contains(index))
        .map(|(_, item)| item)
        .collect())
}

/// Holds the embedder and threshold so callers don't thread them around.
pub struct DuplicateDetector {
    embedder: Arc<dyn Embedder>,
    threshold: f64,
}

impl fmt::Debug for DuplicateDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuplicateDetector")
            .field("embedder", &self.embedder.name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl DuplicateDetector {
    pub fn new(embedder: Arc<dyn Embedder>, config: &DuplicateConfig) -> Self {
        Self {
            embedder,
            threshold: config.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub async fn detect(&self, texts: &[String]) -> Result<Vec<DuplicatePair>> {
        detect_similar(self.embedder.as_ref(), texts, self.threshold).await
    }

    pub async fn filter<T, F>(&self, items: Vec<T>, text_of: F) -> Result<Vec<T>>
    where
        F: Fn(&T) -> String,
    {
        filter_duplicates(self.embedder.as_ref(), items, text_of, self.threshold).await
    }
}
