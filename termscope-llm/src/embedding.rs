use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use termscope_core::{Embedding, EmbeddingError};

use crate::EmbeddingProviderError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_MAX_INPUT_CHARS: usize = 8000;

/// Client for a single-input embeddings endpoint. Input is truncated to
/// the model's character budget before the call; the response vector
/// must match the configured dimension.
#[derive(Clone)]
pub struct ApiEmbedding {
    base_url: String,
    api_key: String,
    model: String,
    dimension: usize,
    max_input_chars: usize,
    http: Client,
}

impl ApiEmbedding {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        dimension: usize,
    ) -> Result<Self, EmbeddingError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| EmbeddingError::Other(Box::new(err)))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            dimension,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            http,
        })
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl Embedding for ApiEmbedding {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let input: String = text.chars().take(self.max_input_chars).collect();
        let url = format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'));
        let request = EmbeddingRequest {
            model: self.model.clone(),
            input,
        };

        let response: EmbeddingResponse = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| EmbeddingProviderError::Request(err.to_string()))?
            .error_for_status()
            .map_err(|err| EmbeddingProviderError::Request(err.to_string()))?
            .json()
            .await
            .map_err(|err| EmbeddingProviderError::Request(err.to_string()))?;

        if response.embedding.len() != self.dimension {
            return Err(EmbeddingProviderError::InvalidResponse(format!(
                "expected embedding dimension {}, got {}",
                self.dimension,
                response.embedding.len()
            ))
            .into());
        }

        Ok(response.embedding)
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.embed(text).await?);
        }
        Ok(out)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
