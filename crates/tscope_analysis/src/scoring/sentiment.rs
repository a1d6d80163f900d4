use tscope_core::{round_to, SentimentLabel, SentimentReport};
use super::lexicon::PolarityAnalyzer;
use super::ScoringConfig;

const LABEL_THRESHOLD: f64 = 0.2;

pub fn label_sentiment(polarity: f64) -> SentimentLabel {
    if polarity < -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else if polarity > LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

/// Polarity rescaled from [-1, 1] to [0, 10].
pub fn analyze_sentiment(text: &str, analyzer: &dyn PolarityAnalyzer, config: &ScoringConfig) -> SentimentReport {
    if text.trim().chars().count() < config.min_sentiment_chars {
        return SentimentReport::not_enough_text();
    }

    let polarity = analyzer.polarity(text).clamp(-1.0, 1.0);
    SentimentReport {
        sentiment_score: round_to((polarity + 1.0) * 5.0, 2),
        sentiment_label: label_sentiment(polarity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::lexicon::LexiconAnalyzer;

    #[derive(Debug)]
    struct FixedPolarity(f64);

    impl PolarityAnalyzer for FixedPolarity {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    const LONG_ENOUGH: &str = "The new handset keeps the same design as last year's model.";

    #[test]
    fn test_short_text_returns_sentinel() {
        let config = ScoringConfig::default();
        for text in ["", "   ", "great", "An excellent, wonderful launch!"] {
            assert_eq!(
                analyze_sentiment(text, &LexiconAnalyzer::new(), &config),
                SentimentReport::not_enough_text()
            );
        }
    }

    #[test]
    fn test_rescaling() {
        let config = ScoringConfig::default();
        let cases = [(-1.0, 0.0), (0.0, 5.0), (1.0, 10.0), (0.25, 6.25)];
        for (polarity, expected) in cases {
            let report = analyze_sentiment(LONG_ENOUGH, &FixedPolarity(polarity), &config);
            assert_eq!(report.sentiment_score, expected);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_sentiment(-0.21), SentimentLabel::Negative);
        assert_eq!(label_sentiment(-0.2), SentimentLabel::Neutral);
        assert_eq!(label_sentiment(0.2), SentimentLabel::Neutral);
        assert_eq!(label_sentiment(0.21), SentimentLabel::Positive);
    }

    #[test]
    fn test_with_lexicon() {
        let config = ScoringConfig::default();
        let text = "Reviewers called the laptop excellent and the battery life wonderful.";
        let report = analyze_sentiment(text, &LexiconAnalyzer::new(), &config);
        assert_eq!(report.sentiment_label, SentimentLabel::Positive);
        assert_eq!(report.sentiment_score, 10.0);
    }
}
