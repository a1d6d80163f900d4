pub mod error;
pub mod fetch;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use fetch::{Fetcher, Page};
pub use models::Embedder;
pub use storage::ArticleSink;
pub use types::{Article, BiasLabel, BiasReport, SentimentLabel, SentimentReport};

/// Cosine similarity of two vectors, computed in f64.
///
/// Returns 0.0 for mismatched lengths or zero-norm vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Round to a fixed number of decimals, the way scores are reported.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub mod prelude {
    pub use crate::{Article, ArticleSink, Embedder, Error, Fetcher, Page, Result};
}
