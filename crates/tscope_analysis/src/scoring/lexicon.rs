//! Lexicon-based polarity in the style of pattern/TextBlob: mean polarity of
//! opinion words, with intensifiers and negation applied to the word that
//! follows them.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

pub trait PolarityAnalyzer: Send + Sync + fmt::Debug {
    /// Polarity in [-1.0, 1.0]; 0.0 when the text carries no opinion words.
    fn polarity(&self, text: &str) -> f64;
}

const POLARITY: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("beautiful", 0.85),
    ("clean", 0.37),
    ("cool", 0.35),
    ("easy", 0.43),
    ("effective", 0.6),
    ("efficient", 0.5),
    ("elegant", 0.5),
    ("enjoy", 0.4),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("fast", 0.2),
    ("fine", 0.42),
    ("fun", 0.3),
    ("glad", 0.5),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("ideal", 0.9),
    ("impressive", 1.0),
    ("improved", 0.3),
    ("innovative", 0.5),
    ("interesting", 0.5),
    ("love", 0.5),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("popular", 0.6),
    ("positive", 0.23),
    ("powerful", 0.3),
    ("promising", 0.5),
    ("reliable", 0.4),
    ("remarkable", 0.75),
    ("safe", 0.5),
    ("secure", 0.4),
    ("smart", 0.21),
    ("solid", 0.3),
    ("strong", 0.43),
    ("success", 0.3),
    ("successful", 0.75),
    ("superb", 1.0),
    ("useful", 0.3),
    ("valuable", 0.5),
    ("win", 0.8),
    ("wonderful", 1.0),
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("brutal", -0.875),
    ("buggy", -0.5),
    ("chaotic", -0.4),
    ("corrupt", -0.5),
    ("cowardly", -0.6),
    ("crash", -0.4),
    ("dangerous", -0.6),
    ("dead", -0.2),
    ("devastating", -0.8),
    ("difficult", -0.5),
    ("disappointing", -0.6),
    ("disaster", -0.6),
    ("dull", -0.31),
    ("evil", -1.0),
    ("expensive", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.32),
    ("fake", -0.5),
    ("hate", -0.8),
    ("horrible", -1.0),
    ("insecure", -0.5),
    ("lose", -0.4),
    ("negative", -0.3),
    ("outrage", -0.5),
    ("painful", -0.7),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scandal", -0.5),
    ("scary", -0.5),
    ("shocking", -1.0),
    ("slow", -0.3),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("tragic", -0.75),
    ("ugly", -0.7),
    ("unreliable", -0.4),
    ("useless", -0.5),
    ("vulnerable", -0.2),
    ("weak", -0.375),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("highly", 1.3),
    ("really", 1.2),
    ("truly", 1.2),
    ("super", 1.3),
    ("quite", 1.1),
    ("most", 1.2),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "cannot", "isn't", "isnt", "aren't", "arent",
    "wasn't", "wasnt", "weren't", "werent", "don't", "dont", "doesn't", "doesnt", "didn't",
    "didnt", "can't", "cant", "won't", "wont", "shouldn't", "shouldnt", "hardly",
];

const NEGATION_FACTOR: f64 = -0.5;

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"[a-z']+").unwrap();
    static ref POLARITY_MAP: HashMap<&'static str, f64> = POLARITY.iter().copied().collect();
    static ref INTENSIFIER_MAP: HashMap<&'static str, f64> = INTENSIFIERS.iter().copied().collect();
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let mut assessments = Vec::new();
        let mut intensity: Option<f64> = None;
        let mut negated = false;

        for token in TOKEN.find_iter(&lowered).map(|m| m.as_str().trim_matches('\'')) {
            if NEGATORS.contains(&token) {
                negated = true;
                continue;
            }
            if let Some(factor) = INTENSIFIER_MAP.get(token) {
                intensity = Some(intensity.unwrap_or(1.0) * factor);
                continue;
            }
            if let Some(polarity) = POLARITY_MAP.get(token) {
                let mut value = polarity * intensity.unwrap_or(1.0);
                if negated {
                    value *= NEGATION_FACTOR;
                }
                assessments.push(value.clamp(-1.0, 1.0));
            }
            intensity = None;
            negated = false;
        }

        if assessments.is_empty() {
            return 0.0;
        }
        let mean = assessments.iter().sum::<f64>() / assessments.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_text_has_zero_polarity() {
        let analyzer = LexiconAnalyzer::new();
        assert_eq!(analyzer.polarity("The chip ships in March with 16 cores."), 0.0);
        assert_eq!(analyzer.polarity(""), 0.0);
    }

    #[test]
    fn test_polarity_is_mean_of_opinion_words() {
        let analyzer = LexiconAnalyzer::new();
        assert!((analyzer.polarity("a great phone") - 0.8).abs() < 1e-9);
        assert!((analyzer.polarity("great camera, bad battery") - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_negation_and_intensifiers() {
        let analyzer = LexiconAnalyzer::new();
        assert!((analyzer.polarity("not good") + 0.35).abs() < 1e-9);
        assert!((analyzer.polarity("isn't good") + 0.35).abs() < 1e-9);
        assert!((analyzer.polarity("very good") - 0.91).abs() < 1e-9);
        assert_eq!(analyzer.polarity("extremely excellent"), 1.0);
    }

    #[test]
    fn test_modifiers_only_reach_the_next_word() {
        let analyzer = LexiconAnalyzer::new();
        assert!((analyzer.polarity("not the launch we wanted, but good") - 0.7).abs() < 1e-9);
    }
}
