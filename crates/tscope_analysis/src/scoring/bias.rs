use lazy_static::lazy_static;
use regex::Regex;
use tscope_core::{round_to, BiasLabel, BiasReport};
use super::lexicon::PolarityAnalyzer;
use super::ScoringConfig;

const LOADED_PHRASES: &[&str] = &[
    "obviously",
    "clearly",
    "undoubtedly",
    "needless to say",
    "without a doubt",
    "no one can deny",
    "there is no doubt",
    "as everyone knows",
    "it is a fact that",
];

const EMOTION_WORDS: &[&str] = &[
    "disaster",
    "outrage",
    "scandal",
    "tragic",
    "heroic",
    "evil",
    "corrupt",
    "shocking",
    "chaotic",
    "miracle",
    "devastating",
    "brutal",
    "cowardly",
];

const CUE_WEIGHT: f64 = 0.7;
const POLARITY_WEIGHT: f64 = 0.3;

lazy_static! {
    static ref URL: Regex = Regex::new(r"http\S+|www.\S+").unwrap();
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-zA-Z0-9\s]").unwrap();
}

fn clean_for_bias(text: &str) -> String {
    let text = URL.replace_all(text, "");
    NON_ALNUM.replace_all(&text, "").trim().to_lowercase()
}

/// Occurrences of loaded phrases and emotion words, non-overlapping per cue.
pub fn count_bias_cues(cleaned: &str) -> usize {
    LOADED_PHRASES
        .iter()
        .chain(EMOTION_WORDS)
        .map(|cue| cleaned.matches(cue).count())
        .sum()
}

pub fn label_bias(score: f64) -> BiasLabel {
    if score < 2.0 {
        BiasLabel::Low
    } else if score < 4.0 {
        BiasLabel::Moderate
    } else {
        BiasLabel::High
    }
}

pub fn analyze_bias(text: &str, analyzer: &dyn PolarityAnalyzer, config: &ScoringConfig) -> BiasReport {
    if text.trim().chars().count() < config.min_bias_chars {
        return BiasReport::not_enough_text();
    }

    let cleaned = clean_for_bias(text);
    let cues = count_bias_cues(&cleaned) as f64;
    let polarity = analyzer.polarity(&cleaned).abs();

    let bias_score = round_to(cues * CUE_WEIGHT + polarity * 10.0 * POLARITY_WEIGHT, 2);
    BiasReport {
        bias_score,
        bias_label: label_bias(bias_score),
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

    const NEUTRAL_FILLER: &str = "The company published its quarterly numbers on Tuesday and \
        described the roadmap for the next two product generations in detail.";

    #[test]
    fn test_short_text_is_not_scored() {
        let report = analyze_bias("Obviously a scandal.", &LexiconAnalyzer::new(), &ScoringConfig::default());
        assert_eq!(report, BiasReport::not_enough_text());
    }

    #[test]
    fn test_cue_counting_ignores_urls_and_punctuation() {
        let cleaned = clean_for_bias("Clearly, a DISASTER! See https://evil.example.com/scandal");
        assert_eq!(cleaned, "clearly a disaster see");
        assert_eq!(count_bias_cues(&cleaned), 2);
    }

    #[test]
    fn test_score_combines_cues_and_polarity() {
        let text = format!("Obviously this is a scandal and clearly a disaster. {}", NEUTRAL_FILLER);
        let report = analyze_bias(&text, &FixedPolarity(-0.5), &ScoringConfig::default());
        // 4 cues * 0.7 + 0.5 * 10 * 0.3
        assert_eq!(report.bias_score, 4.3);
        assert_eq!(report.bias_label, BiasLabel::High);

        let report = analyze_bias(NEUTRAL_FILLER, &FixedPolarity(0.0), &ScoringConfig::default());
        assert_eq!(report.bias_score, 0.0);
        assert_eq!(report.bias_label, BiasLabel::Low);
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_bias(0.0), BiasLabel::Low);
        assert_eq!(label_bias(1.99), BiasLabel::Low);
        assert_eq!(label_bias(2.0), BiasLabel::Moderate);
        assert_eq!(label_bias(3.99), BiasLabel::Moderate);
        assert_eq!(label_bias(4.0), BiasLabel::High);
    }

    #[test]
    fn test_score_is_never_negative() {
        let text = format!("{} This was a terrible, awful, horrible outcome.", NEUTRAL_FILLER);
        let report = analyze_bias(&text, &LexiconAnalyzer::new(), &ScoringConfig::default());
        assert!(report.bias_score >= 0.0);
    }
}
