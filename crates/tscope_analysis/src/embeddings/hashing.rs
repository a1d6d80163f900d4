use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};
use tscope_core::{Embedder, Result};
use super::l2_normalize;

pub const DEFAULT_DIMENSIONS: usize = 384;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"[\p{L}\p{N}]+").unwrap();
}

/// Local feature-hashing embedder. Each lower-cased word token lands in a
/// SHA-256-derived bucket with a signed weight; vectors are L2-normalized.
///
/// Needs no model download, so it is the default when no embedding
/// endpoint is configured. Identical texts always embed identically.
pub struct HashingEmbedder {
    dimensions: usize,
}

impl fmt::Debug for HashingEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashingEmbedder")
            .field("dimensions", &self.dimensions)
            .finish()
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSIONS)
    }
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];
        let lowered = text.to_lowercase();

        for token in TOKEN.find_iter(&lowered) {
            let digest = Sha256::digest(token.as_str().as_bytes());
            let mut bucket_bytes = [0u8; 8];
            bucket_bytes.copy_from_slice(&digest[..8]);
            let bucket = (u64::from_le_bytes(bucket_bytes) % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            embedding[bucket] += sign;
        }

        l2_normalize(&mut embedding);
        embedding
    }
}

#[async_trait::async_trait]
impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tscope_core::cosine_similarity;

    #[tokio::test]
    async fn test_hashing_embedder() {
        let embedder = HashingEmbedder::default();
        let texts = vec![
            "Apple unveils a new laptop".to_string(),
            "apple UNVEILS a new laptop!".to_string(),
            "Regulators fine a social network over data practices".to_string(),
        ];

        let embeddings = embedder.embed(&texts).await.unwrap();
        assert_eq!(embeddings.len(), 3);
        assert!(embeddings.iter().all(|e| e.len() == DEFAULT_DIMENSIONS));

        let norm: f32 = embeddings[0].iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);

        assert!((cosine_similarity(&embeddings[0], &embeddings[1]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&embeddings[0], &embeddings[2]) < 0.5);
    }

    #[tokio::test]
    async fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        let embedding = embedder.embed_one("").await.unwrap();
        assert_eq!(embedding, vec![0.0; 16]);
    }
}
