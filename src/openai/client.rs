use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use super::types::{ChatRequest, ChatResponse, Message};
use crate::config::{OpenAiConfig, RequestConfig};
use crate::error::{CompletionError, CompletionResult};

/// Client for the OpenAI chat completions API
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    request_config: RequestConfig,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    pub fn new(config: &OpenAiConfig, request_config: RequestConfig) -> CompletionResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(request_config.timeout_ms))
            .build()
            .map_err(CompletionError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            request_config,
        })
    }

    /// Request a single completion for the given conversation.
    ///
    /// One call, one timeout: failures are surfaced as-is and never retried
    /// at this layer.
    pub async fn complete(
        &self,
        model: &str,
        messages: Vec<Message>,
        max_tokens: u32,
        temperature: f64,
    ) -> CompletionResult<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest::new(model, messages, max_tokens, temperature);

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Requesting chat completion"
        );

        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_ms: self.request_config.timeout_ms,
                    }
                } else {
                    CompletionError::Http(e)
                }
            })?;

        let status = response.status();
        let latency = start.elapsed();

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(
                model = %request.model,
                status = status.as_u16(),
                latency_ms = latency.as_millis(),
                "Chat completion failed"
            );
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: error_body,
            });
        }

        let chat_response: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::InvalidResponse {
                    message: format!("Failed to parse response: {}", e),
                })?;

        let content = chat_response
            .first_content()
            .ok_or_else(|| CompletionError::InvalidResponse {
                message: "Response contained no completion choices".to_string(),
            })?
            .to_string();

        info!(
            model = %request.model,
            latency_ms = latency.as_millis(),
            "Chat completion succeeded"
        );

        Ok(content)
    }

    /// Get the base URL (for testing)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
