use super::{LlmClient, client::http_client, types::*};
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Generative Language `generateContent` client.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let base_url = if config.base_url.is_empty() {
            DEFAULT_BASE_URL.to_string()
        } else {
            config.base_url
        };

        Ok(Self {
            client: http_client(config.timeout_secs)?,
            endpoint: endpoint(&base_url, &config.model),
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn endpoint(base_url: &str, model: &str) -> String {
    let model = model.strip_prefix("models/").unwrap_or(model);
    format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate(&self, payload: ModelInvocationPayload) -> Result<String> {
        let request = GenerateContentRequest::from(&payload);

        debug!(
            "Sending generateContent request with {} image ({} base64 chars)",
            payload.image.mime_type,
            payload.image.data.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(Error::llm(format!(
                "Gemini request failed ({}): {}",
                status, body
            )));
        }

        let response: GenerateContentResponse = response.json().await?;

        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            warn!("Gemini blocked the prompt: {}", reason);
        }

        response
            .text()
            .ok_or_else(|| Error::llm("Gemini response did not contain any text"))
    }
}
