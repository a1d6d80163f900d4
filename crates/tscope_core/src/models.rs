use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait Embedder: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Embed a batch of texts, one vector per input, in input order
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| crate::Error::Inference(format!("{} returned no embedding", self.name())))
    }
}
