use std::collections::HashMap;
use async_trait::async_trait;
use tscope_core::Result;
use super::{is_stopword, KeywordExtractor};

/// Last resort: most frequent non-stopword terms, ties broken by first occurrence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyExtractor;

#[async_trait]
impl KeywordExtractor for FrequencyExtractor {
    fn name(&self) -> &str {
        "frequency"
    }

    async fn extract(&self, text: &str, top_n: usize) -> Result<Vec<String>> {
        let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
        for (position, word) in text.split_whitespace().enumerate() {
            if word.len() < 3 || is_stopword(word) {
                continue;
            }
            counts.entry(word).or_insert((0, position)).0 += 1;
        }

        let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
        Ok(ranked
            .into_iter()
            .take(top_n)
            .map(|(word, _)| word.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ranks_by_count_then_position() {
        let text = "chips and more chips for phones while phones need chips and an os";
        let keywords = FrequencyExtractor.extract(text, 3).await.unwrap();
        assert_eq!(keywords, vec!["chips", "phones", "need"]);
    }
}
