use std::collections::HashMap;
use async_trait::async_trait;
use tscope_core::Result;
use super::{is_stopword, KeywordExtractor};

/// Rapid Automatic Keyword Extraction: candidate phrases are the runs of
/// words between stopwords, scored by summed word degree over frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct RakeExtractor;

fn candidate_phrases(text: &str) -> Vec<Vec<&str>> {
    let mut phrases = Vec::new();
    let mut current = Vec::new();
    for word in text.split_whitespace() {
        if is_stopword(word) {
            if !current.is_empty() {
                phrases.push(std::mem::take(&mut current));
            }
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        phrases.push(current);
    }
    phrases
}

pub fn rank_phrases(text: &str) -> Vec<(String, f64)> {
    let phrases = candidate_phrases(text);

    let mut frequency: HashMap<&str, f64> = HashMap::new();
    let mut degree: HashMap<&str, f64> = HashMap::new();
    for phrase in &phrases {
        for word in phrase {
            *frequency.entry(*word).or_default() += 1.0;
            *degree.entry(*word).or_default() += phrase.len() as f64;
        }
    }

    let mut ranked: Vec<(String, f64)> = Vec::new();
    for phrase in &phrases {
        let joined = phrase.join(" ");
        if ranked.iter().any(|(p, _)| *p == joined) {
            continue;
        }
        let score = phrase.iter().map(|w| degree[w] / frequency[w]).sum();
        ranked.push((joined, score));
    }

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

#[async_trait]
impl KeywordExtractor for RakeExtractor {
    fn name(&self) -> &str {
        "rake"
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        Ok(rank_phrases(text)
            .into_iter()
            .take(top_n)
            .map(|(phrase, _)| phrase)
            .collect())
    }
}
