use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tscope_core::round_to;
use super::ScoringConfig;

const CLICKBAIT_PHRASES: &[&str] = &[
    "you won't believe",
    "shocking",
    "top secret",
    "exposed",
    "miracle",
    "will blow your mind",
    "never seen before",
    "what happens next",
];

const CITATION_PHRASES: &[&str] = &["according to", "source:"];

/// Word count at which the length component saturates
const IDEAL_WORD_COUNT: f64 = 300.0;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").unwrap();
    static ref EXCESSIVE_PUNCT: Regex = Regex::new(r"[!?]{2,}").unwrap();
}

/// Heuristic credibility in [0, 1], rounded to two decimals, or `None` when
/// the trimmed text is shorter than `min_credibility_chars`.
///
/// Weighted: 0.4 length, 0.2 citation present, 0.4 inverse penalty for
/// clickbait phrases, exclamations, `!?` runs and repeated-word spam.
pub fn score_credibility(text: &str, config: &ScoringConfig) -> Option<f64> {
    let text = text.trim().to_lowercase();
    if text.chars().count() < config.min_credibility_chars {
        return None;
    }

    let clickbait = CLICKBAIT_PHRASES.iter().filter(|p| text.contains(*p)).count();
    let exclamations = text.matches('!').count() + text.matches("!!!").count();
    let excessive_punct = EXCESSIVE_PUNCT.find_iter(&text).count();

    let words: Vec<&str> = WORD.find_iter(&text).map(|m| m.as_str()).collect();
    let repetition = repetition_penalty(&words);

    let has_source = CITATION_PHRASES.iter().any(|p| text.contains(p));
    let length_score = (words.len() as f64 / IDEAL_WORD_COUNT).min(1.0);

    let penalties = (clickbait + exclamations + excessive_punct + repetition) as f64;
    let raw = length_score * 0.4
        + if has_source { 0.2 } else { 0.0 }
        + (1.0 / (1.0 + penalties)) * 0.4;

    Some(round_to(raw.clamp(0.0, 1.0), 2))
}

/// Sum of the three highest word frequencies that exceed five.
fn repetition_penalty(words: &[&str]) -> usize {
    let mut freq: HashMap<&str, usize> = HashMap::new();
    for word in words {
        *freq.entry(*word).or_insert(0) += 1;
    }
    let mut counts: Vec<usize> = freq.into_values().collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts.into_iter().take(3).filter(|&c| c > 5).sum()
}
