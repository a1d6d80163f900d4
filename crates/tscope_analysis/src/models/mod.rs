use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tscope_core::{Error, Result};
use crate::ModelConfig;

pub mod extractive;

pub use extractive::ExtractiveSummarizer;

pub const TOO_SHORT_SUMMARY: &str = "Article too short to summarize.";
pub const MIN_SUMMARY_CHARS: usize = 100;

const MAX_INPUT_WORDS: usize = 3000;
const SYSTEM_PROMPT: &str = "You are a concise news summarizer.";

#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;
    async fn summarize(&self, text: &str) -> Result<String>;
}

/// Strategies tried in order; the first non-empty summary wins.
#[derive(Debug)]
pub struct SummaryChain {
    strategies: Vec<Arc<dyn Summarizer>>,
}

impl SummaryChain {
    pub fn new(strategies: Vec<Arc<dyn Summarizer>>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> impl Iterator<Item = &str> {
        self.strategies.iter().map(|s| s.name())
    }

    pub async fn summarize(&self, text: &str) -> Result<String> {
        if text.trim().chars().count() < MIN_SUMMARY_CHARS {
            return Ok(TOO_SHORT_SUMMARY.to_string());
        }

        for strategy in &self.strategies {
            match strategy.summarize(text).await {
                Ok(summary) if !summary.trim().is_empty() => return Ok(summary.trim().to_string()),
                Ok(_) => tracing::warn!("{} returned an empty summary", strategy.name()),
                Err(e) => tracing::warn!("{} summarization failed: {}", strategy.name(), e),
            }
        }

        Err(Error::Inference("every summarization strategy failed".to_string()))
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Abstractive summaries from an OpenAI-compatible chat completions endpoint.
pub struct ChatSummarizer {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl fmt::Debug for ChatSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSummarizer")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl ChatSummarizer {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            max_tokens: 300,
        })
    }
}

fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace().take(max_words).collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl Summarizer for ChatSummarizer {
    fn name(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, text: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Summarize the following news article:\n\n{}",
                        truncate_words(text, MAX_INPUT_WORDS)
                    ),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.5,
        };

        let mut builder = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Inference(format!("{} returned no choices", self.model)))
    }
}

/// Chat model first when one is configured, extractive lead always last.
pub fn create_summarizer(config: &ModelConfig) -> Result<SummaryChain> {
    let mut strategies: Vec<Arc<dyn Summarizer>> = Vec::new();

    if config.chat_enabled() {
        tracing::info!("📝 Using chat summarizer {} at {}", config.llm_model, config.llm_base_url());
        strategies.push(Arc::new(ChatSummarizer::new(
            config.llm_base_url(),
            config.llm_model.clone(),
            config.openai_api_key.clone(),
        )?));
    } else {
        tracing::info!("📝 No chat model configured, using extractive summaries");
    }
    strategies.push(Arc::new(ExtractiveSummarizer::default()));

    Ok(SummaryChain::new(strategies))
}
