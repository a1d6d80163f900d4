//! Heuristic scorers. Each one is a pure function of cleaned text and
//! short-circuits to a "not enough text" sentinel below its minimum length.

pub mod bias;
pub mod credibility;
pub mod lexicon;
pub mod sentiment;

pub use bias::analyze_bias;
pub use credibility::score_credibility;
pub use lexicon::{LexiconAnalyzer, PolarityAnalyzer};
pub use sentiment::analyze_sentiment;

/// Minimum trimmed lengths, in characters, below which scorers return their sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub min_credibility_chars: usize,
    pub min_bias_chars: usize,
    pub min_sentiment_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_credibility_chars: 1,
            min_bias_chars: 100,
            min_sentiment_chars: 50,
        }
    }
}

impl ScoringConfig {
    /// Overrides from `TECHSCOPE_MIN_CREDIBILITY_CHARS`, `TECHSCOPE_MIN_BIAS_CHARS`
    /// and `TECHSCOPE_MIN_SENTIMENT_CHARS`.
    pub fn from_env() -> Self {
        let read = |name: &str, default: usize| {
            std::env::var(name)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let defaults = Self::default();
        Self {
            min_credibility_chars: read("TECHSCOPE_MIN_CREDIBILITY_CHARS", defaults.min_credibility_chars),
            min_bias_chars: read("TECHSCOPE_MIN_BIAS_CHARS", defaults.min_bias_chars),
            min_sentiment_chars: read("TECHSCOPE_MIN_SENTIMENT_CHARS", defaults.min_sentiment_chars),
        }
    }
}
