use std::fmt;
use std::sync::Arc;
use tscope_core::{Article, BiasReport, Result, SentimentReport};
use crate::embeddings::create_embedder;
use crate::keywords::{create_keyword_extractor, KeywordChain};
use crate::models::{create_summarizer, SummaryChain};
use crate::scoring::{analyze_bias, analyze_sentiment, score_credibility, LexiconAnalyzer, PolarityAnalyzer, ScoringConfig};
use crate::ModelConfig;

/// Everything that turns article text into summary, keywords and scores.
pub struct Analyzer {
    summarizer: SummaryChain,
    keywords: KeywordChain,
    polarity: Arc<dyn PolarityAnalyzer>,
    scoring: ScoringConfig,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("summarizer", &self.summarizer.strategies().collect::<Vec<_>>())
            .field("keywords", &self.keywords.strategies().collect::<Vec<_>>())
            .field("polarity", &self.polarity)
            .field("scoring", &self.scoring)
            .finish()
    }
}

impl Analyzer {
    pub fn new(
        summarizer: SummaryChain,
        keywords: KeywordChain,
        polarity: Arc<dyn PolarityAnalyzer>,
        scoring: ScoringConfig,
    ) -> Self {
        Self {
            summarizer,
            keywords,
            polarity,
            scoring,
        }
    }

    /// Keyword ranking by embeddings only joins when an embedding endpoint is set.
    pub fn from_config(config: &ModelConfig, scoring: ScoringConfig) -> Result<Self> {
        let keyword_embedder = match config.embedding_url {
            Some(_) => Some(create_embedder(config)?),
            None => None,
        };
        Ok(Self::new(
            create_summarizer(config)?,
            create_keyword_extractor(keyword_embedder),
            Arc::new(LexiconAnalyzer::new()),
            scoring,
        ))
    }

    pub async fn summarize(&self, text: &str) -> Result<String> {
        self.summarizer.summarize(text).await
    }

    pub async fn keywords(&self, text: &str) -> Vec<String> {
        self.keywords.extract(text).await
    }

    /// `None` when the text is too short to score.
    pub fn credibility(&self, text: &str) -> Option<f64> {
        score_credibility(text, &self.scoring)
    }

    pub fn bias(&self, text: &str) -> BiasReport {
        analyze_bias(text, self.polarity.as_ref(), &self.scoring)
    }

    pub fn sentiment(&self, text: &str) -> SentimentReport {
        analyze_sentiment(text, self.polarity.as_ref(), &self.scoring)
    }

    /// Fill every analysis field from the article's text.
    pub async fn analyze(&self, mut article: Article) -> Result<Article> {
        let text = article.analysis_text().to_string();
        article.summary = Some(self.summarize(&text).await?);
        article.keywords = Some(self.keywords(&text).await);
        article.credibility = self.credibility(&text);
        article.bias = Some(self.bias(&text));
        article.sentiment = Some(self.sentiment(&text));
        Ok(article)
    }
}
