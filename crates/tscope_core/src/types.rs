use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A news article as it moves through scraping, analysis and storage.
///
/// Identity is the source `url`; nothing enforces uniqueness across sinks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub url: String,
    pub title: String,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: String,
    pub content: String,
    pub summary: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub credibility: Option<f64>,
    pub bias: Option<BiasReport>,
    pub sentiment: Option<SentimentReport>,
    /// Set by the sink at write time.
    pub stored_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(url: impl Into<String>, title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Text the analysis steps should look at: the body, or the summary for feed entries.
    pub fn analysis_text(&self) -> &str {
        if self.content.trim().is_empty() {
            self.summary.as_deref().unwrap_or_default()
        } else {
            &self.content
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiasLabel {
    #[serde(rename = "Low Bias")]
    Low,
    #[serde(rename = "Moderate Bias")]
    Moderate,
    #[serde(rename = "High Bias")]
    High,
    #[serde(rename = "Not enough text")]
    NotEnoughText,
}

impl fmt::Display for BiasLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BiasLabel::Low => "Low Bias",
            BiasLabel::Moderate => "Moderate Bias",
            BiasLabel::High => "High Bias",
            BiasLabel::NotEnoughText => "Not enough text",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasReport {
    pub bias_score: f64,
    pub bias_label: BiasLabel,
}

impl BiasReport {
    pub fn not_enough_text() -> Self {
        Self {
            bias_score: 0.0,
            bias_label: BiasLabel::NotEnoughText,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
    #[serde(rename = "Not enough text")]
    NotEnoughText,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::NotEnoughText => "Not enough text",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
}

impl SentimentReport {
    pub fn not_enough_text() -> Self {
        Self {
            sentiment_score: 0.0,
            sentiment_label: SentimentLabel::NotEnoughText,
        }
    }
}
