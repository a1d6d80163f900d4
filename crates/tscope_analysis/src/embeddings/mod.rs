use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tscope_core::{Embedder, Error, Result};
use crate::ModelConfig;

pub mod hashing;

pub use hashing::HashingEmbedder;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    input: &'a [String],
    model: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: Option<usize>,
}

/// Sentence embeddings from an OpenAI-compatible `/embeddings` endpoint
/// (OpenAI, Ollama, a local sentence-transformers server, ...).
pub struct HttpEmbedder {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl fmt::Debug for HttpEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpEmbedder")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl HttpEmbedder {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }
}

#[async_trait::async_trait]
impl Embedder for HttpEmbedder {
    fn name(&self) -> &str {
        &self.model
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = EmbeddingRequest {
            input: texts,
            model: &self.model,
        };
        let mut builder = self.client
            .post(format!("{}/embeddings", self.base_url))
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()?
            .json::<EmbeddingResponse>()
            .await?;

        let mut data = response.data;
        if data.len() != texts.len() {
            return Err(Error::Inference(format!(
                "{} returned {} embeddings for {} inputs",
                self.model,
                data.len(),
                texts.len()
            )));
        }
        data.sort_by_key(|d| d.index.unwrap_or(0));

        Ok(data
            .into_iter()
            .map(|d| {
                let mut embedding = d.embedding;
                l2_normalize(&mut embedding);
                embedding
            })
            .collect())
    }
}

/// Scale to unit length in place; zero vectors are left untouched.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|x| *x /= norm);
    }
}

/// Remote embedder when an endpoint is configured, local hashing otherwise.
pub fn create_embedder(config: &ModelConfig) -> Result<Arc<dyn Embedder>> {
    match &config.embedding_url {
        Some(url) => {
            tracing::info!("🔢 Using embedding model {} at {}", config.embedding_model, url);
            Ok(Arc::new(HttpEmbedder::new(
                url.clone(),
                config.embedding_model.clone(),
                config.embedding_api_key.clone(),
            )?))
        }
        None => {
            tracing::info!("🔢 No embedding endpoint configured, using local hashing embedder");
            Ok(Arc::new(HashingEmbedder::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_normalize() {
        let mut v = vec![3.0, 4.0];
        l2_normalize(&mut v);
        assert!((v[0] - 0.6).abs() < 1e-6);
        assert!((v[1] - 0.8).abs() < 1e-6);

        let mut zero = vec![0.0, 0.0];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0, 0.0]);
    }

    #[test]
    fn test_create_embedder_defaults_to_hashing() {
        let embedder = create_embedder(&ModelConfig::default()).unwrap();
        assert_eq!(embedder.name(), "hashing");

        let config = ModelConfig {
            embedding_url: Some("http://localhost:11434/v1/".to_string()),
            ..ModelConfig::default()
        };
        let embedder = create_embedder(&config).unwrap();
        assert_eq!(embedder.name(), config.embedding_model);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let embedder = HttpEmbedder::new("http://localhost", "all-minilm", Some("secret".to_string())).unwrap();
        let debug = format!("{:?}", embedder);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
