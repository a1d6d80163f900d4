use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use tscope_core::Result;
use super::Summarizer;

pub const DEFAULT_SENTENCES: usize = 5;

lazy_static! {
    static ref SENTENCE: Regex = Regex::new(r"[^.!?]+(?:[.!?]+|$)").unwrap();
}

/// Lead-based summary: the first few sentences of the article.
#[derive(Debug, Clone)]
pub struct ExtractiveSummarizer {
    sentences: usize,
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SENTENCES)
    }
}

impl ExtractiveSummarizer {
    pub fn new(sentences: usize) -> Self {
        Self {
            sentences: sentences.max(1),
        }
    }
}

pub fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|s| !s.is_empty())
        .collect()
}

#[async_trait]
impl Summarizer for ExtractiveSummarizer {
    fn name(&self) -> &str {
        "extractive"
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        Ok(split_sentences(text)
            .into_iter()
            .take(self.sentences)
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("First one. Second one!  Third?! trailing words");
        assert_eq!(sentences, vec!["First one.", "Second one!", "Third?!", "trailing words"]);
        assert!(split_sentences("   ").is_empty());
    }

    #[tokio::test]
    async fn test_takes_leading_sentences() {
        let text = "One. Two. Three. Four. Five. Six. Seven.";
        assert_eq!(
            ExtractiveSummarizer::default().summarize(text).await.unwrap(),
            "One. Two. Three. Four. Five."
        );
        assert_eq!(ExtractiveSummarizer::new(2).summarize(text).await.unwrap(), "One. Two.");
    }
}
