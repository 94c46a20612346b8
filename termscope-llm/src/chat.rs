use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use termscope_core::{CompletionError, CompletionRequest, LanguageModel, Message};

const API_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_TOP_P: f32 = 0.9;

/// Client for an Anthropic-style messages API.
#[derive(Clone)]
pub struct ApiChatModel {
    base_url: String,
    api_key: String,
    model: String,
    http: Client,
}

impl ApiChatModel {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| CompletionError::Provider(err.to_string()))?;
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            http,
        })
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait::async_trait]
impl LanguageModel for ApiChatModel {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: DEFAULT_TOP_P,
            system: request.system,
            messages: request.messages,
        };

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let response: MessagesResponse = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    CompletionError::Timeout(REQUEST_TIMEOUT)
                } else {
                    CompletionError::Provider(err.to_string())
                }
            })?
            .error_for_status()
            .map_err(|err| CompletionError::Provider(err.to_string()))?
            .json()
            .await
            .map_err(|err| CompletionError::InvalidResponse(err.to_string()))?;

        let text = response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<String>();
        if text.is_empty() {
            return Err(CompletionError::InvalidResponse(
                "response carried no text content".to_string(),
            ));
        }
        Ok(text)
    }
}
